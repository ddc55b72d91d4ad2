//! Trigger a browser download for an in-memory document.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::{AppError, AppResult, CSV_MIME_TYPE};

/// Object URL revoked when dropped.
struct ObjectUrl(String);

impl ObjectUrl {
    fn new(blob: &Blob) -> AppResult<Self> {
        Url::create_object_url_with_blob(blob)
            .map(Self)
            .map_err(js_error)
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.0) {
            log::warn!("Failed to revoke object URL: {:?}", e);
        }
    }
}

fn js_error(value: JsValue) -> AppError {
    AppError::Download(format!("{:?}", value))
}

/// Save `content` as `filename` through a temporary anchor.
///
/// The anchor is removed and the object URL revoked before returning,
/// including on failure.
pub fn download_csv(content: &str, filename: &str) -> AppResult<()> {
    let window = web_sys::window().ok_or(AppError::Dom("window"))?;
    let document = window.document().ok_or(AppError::Dom("document"))?;
    let body = document.body().ok_or(AppError::Dom("document body"))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(CSV_MIME_TYPE);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;

    let url = ObjectUrl::new(&blob)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| AppError::Dom("anchor element"))?;
    anchor.set_href(url.as_str());
    anchor.set_download(filename);

    body.append_child(&anchor).map_err(js_error)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_error)?;

    log::info!("💾 Downloaded {}", filename);
    Ok(())
}
