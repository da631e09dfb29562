//! Cookie Lookup
//!
//! CSRF token is read from `document.cookie` on every request; nothing is cached.

use percent_encoding::percent_decode_str;
use wasm_bindgen::JsCast;

/// Find `name` in a `document.cookie` string and percent-decode its value.
pub fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    if cookie_header.is_empty() || name.is_empty() {
        return None;
    }
    let prefix = format!("{}=", name);
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

/// Read a cookie from the current document.
pub fn document_cookie(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let html = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
    let header = html.cookie().ok()?;
    get_cookie(&header, name)
}
