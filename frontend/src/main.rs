//! Entry point for the WASM application

pub fn main() {
    tunestats_web::start();
}
