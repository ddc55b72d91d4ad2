//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Tunestats"</h1>
            <p class="subtitle">
                "Paste a Spotify playlist link and an access token to download "
                "the audio features of its tracks as CSV."
            </p>
        </div>
    }
}
