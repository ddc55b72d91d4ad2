//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <a href="https://developer.spotify.com/documentation/web-api" class="footer-link" target="_blank">
                    "Spotify Web API"
                </a>
            </div>
        </footer>
    }
}
