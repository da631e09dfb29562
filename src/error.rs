//! Cart Errors
//!
//! Every failure of a mutation ends up here and is turned into a notice.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Taxonomy class of a [`CartError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any network call
    Validation,
    /// Server answered `success:false`
    Application,
    /// Network, HTTP or decoding failure
    Transport,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("missing item id")]
    MissingItemId,
    #[error("unknown cart action: {0:?}")]
    UnknownAction(String),
    #[error("quantity must be a positive integer, got {0:?}")]
    InvalidQuantity(String),
    #[error("server rejected mutation: {0}")]
    Rejected(String),
    #[error("cannot encode request: {0}")]
    Encode(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    Http(u16),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::MissingItemId | CartError::UnknownAction(_) | CartError::InvalidQuantity(_) => {
                ErrorKind::Validation
            }
            CartError::Rejected(_) => ErrorKind::Application,
            CartError::Encode(_)
            | CartError::Network(_)
            | CartError::Http(_)
            | CartError::MalformedResponse(_) => ErrorKind::Transport,
        }
    }

    /// Text shown to the shopper.
    ///
    /// Server messages are shown verbatim; transport failures use `generic`.
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            CartError::Rejected(msg) if !msg.trim().is_empty() => msg.clone(),
            CartError::Rejected(_) => generic.to_string(),
            CartError::MissingItemId => "This cart button is missing its item.".to_string(),
            CartError::UnknownAction(_) => "This cart button is not supported.".to_string(),
            CartError::InvalidQuantity(_) => "Please enter a quantity of at least 1.".to_string(),
            CartError::Encode(_)
            | CartError::Network(_)
            | CartError::Http(_)
            | CartError::MalformedResponse(_) => generic.to_string(),
        }
    }

    /// Map a rejected `fetch` promise or failed web-sys call.
    pub fn from_js(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        CartError::Network(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERIC: &str = "Something went wrong updating your cart.";

    #[test]
    fn test_kinds() {
        assert_eq!(CartError::MissingItemId.kind(), ErrorKind::Validation);
        assert_eq!(CartError::InvalidQuantity("-1".into()).kind(), ErrorKind::Validation);
        assert_eq!(CartError::Rejected("x".into()).kind(), ErrorKind::Application);
        assert_eq!(CartError::Http(500).kind(), ErrorKind::Transport);
        assert_eq!(CartError::Encode("x".into()).kind(), ErrorKind::Transport);
        assert_eq!(CartError::MalformedResponse("x".into()).kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_user_message() {
        assert_eq!(CartError::Rejected("Out of stock".into()).user_message(GENERIC), "Out of stock");
        assert_eq!(CartError::Rejected("  ".into()).user_message(GENERIC), GENERIC);
        assert_eq!(CartError::Network("offline".into()).user_message(GENERIC), GENERIC);
        assert_eq!(CartError::Http(502).user_message(GENERIC), GENERIC);
        assert_eq!(CartError::Encode("bad body".into()).user_message(GENERIC), GENERIC);
    }
}
