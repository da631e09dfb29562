//! Mutate Endpoint
//!
//! Request building is pure; `FetchTransport` hands it to the browser `fetch`.

use std::rc::Rc;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::CartTransport;
use crate::config::{BodyEncoding, CartSyncConfig};
use crate::cookie::document_cookie;
use crate::error::CartError;
use crate::models::{MutationBody, MutationRequest, MutationResponse};

/// Unreserved characters stay as-is in the item id path segment and form values
const UNRESERVED_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const ITEM_ID_PLACEHOLDER: &str = "{itemId}";

/// Everything needed to issue one POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub url: String,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

/// Build the POST for `request` according to the deployment's encoding.
///
/// The CSRF header is omitted when no token is available.
pub fn build_request(
    config: &CartSyncConfig,
    request: &MutationRequest,
    csrf_token: Option<&str>,
) -> Result<PreparedRequest, CartError> {
    let item_id = utf8_percent_encode(&request.item_id, UNRESERVED_ENCODE_SET).to_string();
    let url = config.endpoint_template.replace(ITEM_ID_PLACEHOLDER, &item_id);

    let body = match config.body_encoding {
        BodyEncoding::Json => serde_json::to_string(&MutationBody::from(request))
            .map_err(|e| CartError::Encode(e.to_string()))?,
        BodyEncoding::Form => {
            let mut pairs = vec![form_pair("action", request.action.as_str())];
            if let Some(qty) = request.qty {
                pairs.push(form_pair("qty", &qty.to_string()));
            }
            pairs.join("&")
        }
    };

    let mut headers = vec![
        ("Content-Type".to_string(), config.body_encoding.content_type().to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ];
    if let Some(token) = csrf_token {
        headers.push((config.csrf_header.clone(), token.to_string()));
    }

    Ok(PreparedRequest { url, body, headers })
}

fn form_pair(name: &str, value: &str) -> String {
    format!(
        "{}={}",
        utf8_percent_encode(name, UNRESERVED_ENCODE_SET),
        utf8_percent_encode(value, UNRESERVED_ENCODE_SET)
    )
}

/// Decide what a reply means once its body has been parsed (or not).
///
/// A parseable body wins over the status, so a rejected request can still
/// explain itself; an unparseable body on an error status reports the status.
pub fn interpret_reply(
    ok: bool,
    status: u16,
    parsed: Result<MutationResponse, CartError>,
) -> Result<MutationResponse, CartError> {
    match parsed {
        Ok(body) => Ok(body),
        Err(_) if !ok => Err(CartError::Http(status)),
        Err(e) => Err(e),
    }
}

/// Browser `fetch` transport
pub struct FetchTransport {
    config: Rc<CartSyncConfig>,
}

impl FetchTransport {
    pub fn new(config: Rc<CartSyncConfig>) -> Self {
        Self { config }
    }

    async fn fetch(&self, prepared: &PreparedRequest) -> Result<web_sys::Response, CartError> {
        let window = web_sys::window().ok_or_else(|| CartError::Network("no window".into()))?;

        let opts = web_sys::RequestInit::new();
        opts.set_method("POST");
        opts.set_credentials(web_sys::RequestCredentials::SameOrigin);
        opts.set_body(&wasm_bindgen::JsValue::from_str(&prepared.body));

        let request = web_sys::Request::new_with_str_and_init(&prepared.url, &opts)
            .map_err(CartError::from_js)?;
        for (name, value) in &prepared.headers {
            request.headers().set(name, value).map_err(CartError::from_js)?;
        }

        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(CartError::from_js)?;
        response
            .dyn_into::<web_sys::Response>()
            .map_err(CartError::from_js)
    }
}

#[async_trait(?Send)]
impl CartTransport for FetchTransport {
    async fn send(&self, request: &MutationRequest) -> Result<MutationResponse, CartError> {
        let token = document_cookie(&self.config.csrf_cookie);
        if token.is_none() {
            log::warn!("[CartSync] No '{}' cookie, sending without CSRF token", self.config.csrf_cookie);
        }
        let prepared = build_request(&self.config, request, token.as_deref())?;
        log::debug!("[CartSync] POST {} {}", prepared.url, prepared.body);

        let response = self.fetch(&prepared).await?;
        let parsed = match response.json() {
            Ok(promise) => match JsFuture::from(promise).await {
                Ok(value) => serde_wasm_bindgen::from_value::<MutationResponse>(value)
                    .map_err(|e| CartError::MalformedResponse(e.to_string())),
                Err(e) => Err(CartError::MalformedResponse(CartError::from_js(e).to_string())),
            },
            Err(e) => Err(CartError::MalformedResponse(CartError::from_js(e).to_string())),
        };

        interpret_reply(response.ok(), response.status(), parsed)
    }
}
