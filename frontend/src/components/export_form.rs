//! Playlist export form.
//!
//! Two inputs and a download button. Failures are shown inline on the field
//! they concern and cleared as soon as either input is edited.

use std::rc::Rc;

use leptos::*;
use tunestats_core::{export_playlist, ReferenceTable, RowStyle};

use crate::components::add_log;
use crate::services::{download_csv, SpotifyService};
use crate::{FieldErrors, LogEntry, LogLevel};

fn field_class(has_error: bool) -> &'static str {
    if has_error {
        "field field-error"
    } else {
        "field"
    }
}

#[component]
pub fn ExportForm(
    /// Reference table loaded at startup
    table: ReadSignal<Rc<ReferenceTable>>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let (link, set_link) = create_signal(String::new());
    let (token, set_token) = create_signal(String::new());
    let (errors, set_errors) = create_signal(FieldErrors::default());
    let (is_busy, set_is_busy) = create_signal(false);

    let clear_errors = move || {
        if !errors.get_untracked().is_empty() {
            set_errors.set(FieldErrors::default());
        }
    };

    let on_download = move |_| {
        if is_busy.get_untracked() {
            return;
        }

        let link = link.get_untracked();
        let token = token.get_untracked();
        let table = table.get_untracked();

        set_errors.set(FieldErrors::default());
        set_is_busy.set(true);

        spawn_local(async move {
            let service = SpotifyService::default();

            match export_playlist(&service, &table, &link, &token, RowStyle::Legacy).await {
                Ok(export) => {
                    let report = &export.report;
                    add_log(
                        set_logs,
                        LogLevel::Info,
                        &format!(
                            "🎵 {}: matched {} of {} tracks",
                            export.playlist_name, report.matched, report.total
                        ),
                    );

                    match download_csv(&export.document.to_string(), &export.filename()) {
                        Ok(()) => add_log(
                            set_logs,
                            LogLevel::Success,
                            &format!("✅ Saved {}", export.filename()),
                        ),
                        Err(e) => add_log(set_logs, LogLevel::Error, &format!("❌ {}", e)),
                    }
                }
                Err(e) => {
                    add_log(set_logs, LogLevel::Error, &format!("❌ {}", e));
                    set_errors.set(FieldErrors::from_error(&e));
                }
            }

            set_is_busy.set(false);
        });
    };

    view! {
        <div class="export-form">
            <div class=move || field_class(errors.get().link.is_some())>
                <label for="link-field">"Playlist link"</label>
                <input
                    id="link-field"
                    type="url"
                    placeholder="https://open.spotify.com/playlist/..."
                    prop:value=link
                    on:input=move |ev| {
                        set_link.set(event_target_value(&ev));
                        clear_errors();
                    }
                />
                <Show when=move || errors.get().link.is_some() fallback=|| view! { }>
                    <div class="error-message">{move || errors.get().link.unwrap_or_default()}</div>
                </Show>
            </div>

            <div class=move || field_class(errors.get().access_token.is_some())>
                <label for="access-token">"Access token"</label>
                <input
                    id="access-token"
                    type="password"
                    autocomplete="off"
                    prop:value=token
                    on:input=move |ev| {
                        set_token.set(event_target_value(&ev));
                        clear_errors();
                    }
                />
                <Show when=move || errors.get().access_token.is_some() fallback=|| view! { }>
                    <div class="error-message">
                        {move || errors.get().access_token.unwrap_or_default()}
                    </div>
                </Show>
            </div>

            <Show when=move || errors.get().general.is_some() fallback=|| view! { }>
                <div class="error-message">{move || errors.get().general.unwrap_or_default()}</div>
            </Show>

            <button
                id="download-button"
                class="download-button"
                disabled=move || is_busy.get()
                on:click=on_download
            >
                {move || if is_busy.get() { "⏳ Exporting..." } else { "Download CSV" }}
            </button>
        </div>
    }
}
