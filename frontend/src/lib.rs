//! Tunestats - Frontend Rust/Leptos Application
//!
//! A WebAssembly page that exports the audio features of a Spotify playlist
//! as CSV, entirely in the browser.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent (reference table loaded once at startup)        │
//! │  ├── Hero (title, description)                              │
//! │  ├── ExportForm (link, token, download)                      │
//! │  └── LogsPanel (when something was logged)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (LogEntry, FieldErrors, AppError)
//! - [`components`] - UI components
//! - [`services`] - Reference table, Spotify and download helpers

use std::rc::Rc;

use leptos::*;
use leptos_router::*;
use tunestats_core::ReferenceTable;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::*;

pub use types::{
    // Logs
    LogEntry, LogLevel,
    // Form
    FieldErrors,
    // Errors
    AppError, AppResult,
};

pub use components::*;

pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install the panic hook and console logger, then mount [`App`].
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Tunestats - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let (table, set_table) = create_signal(Rc::new(ReferenceTable::empty()));
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());

    // Load the reference table ONCE at app startup
    spawn_local(async move {
        let loaded = load_reference_table(REFERENCE_TABLE_PATH).await;
        if loaded.is_empty() {
            add_log(
                set_logs,
                LogLevel::Warning,
                "⚠️ Reference table unavailable, exports will contain only the header",
            );
        }
        set_table.set(Rc::new(loaded));
    });

    view! {
        <div class="container">
            <Hero/>

            <ExportForm table=table set_logs=set_logs/>

            <Show
                when=move || !logs.get().is_empty()
                fallback=|| view! { }
            >
                <LogsPanel logs=logs set_logs=set_logs/>
            </Show>
        </div>

        <Footer/>
    }
}
