//! Deployment Configuration
//!
//! Read once at startup from `<script type="application/json" id="cart-sync-config">`.
//! Every field has a default, so the element may be absent or partial.

use serde::{Deserialize, Serialize};

/// Id of the element carrying the JSON configuration
pub const CONFIG_ELEMENT_ID: &str = "cart-sync-config";

/// How the mutate endpoint expects its body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    #[default]
    Json,
    Form,
}

impl BodyEncoding {
    pub fn content_type(&self) -> &'static str {
        match self {
            BodyEncoding::Json => "application/json",
            BodyEncoding::Form => "application/x-www-form-urlencoded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CartSyncConfig {
    /// Endpoint path, `{itemId}` is replaced by the encoded item id
    pub endpoint_template: String,
    pub body_encoding: BodyEncoding,
    pub csrf_cookie: String,
    pub csrf_header: String,

    pub control_selector: String,
    pub action_attribute: String,
    pub item_id_attribute: String,
    /// Attribute holding a selector of the quantity input used by `add`
    pub qty_input_attribute: String,
    /// Attribute holding a literal quantity used by `add`
    pub qty_attribute: String,

    pub line_selector: String,
    pub qty_selector: String,
    pub line_total_selector: String,
    pub total_selector: String,
    pub count_selector: String,
    pub container_selector: String,
    pub notification_host_id: String,

    pub empty_message: String,
    pub currency_symbol: String,
    pub generic_error_message: String,
    pub notice_duration_ms: u32,

    /// Drop responses older than the last one applied for the same item
    pub discard_stale_responses: bool,
    pub log_level: String,
}

impl Default for CartSyncConfig {
    fn default() -> Self {
        Self {
            endpoint_template: "/cart/items/{itemId}/mutate".to_string(),
            body_encoding: BodyEncoding::Json,
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRF-Token".to_string(),
            control_selector: "[data-cart-action]".to_string(),
            action_attribute: "data-cart-action".to_string(),
            item_id_attribute: "data-item-id".to_string(),
            qty_input_attribute: "data-qty-input".to_string(),
            qty_attribute: "data-qty".to_string(),
            line_selector: "[data-cart-line]".to_string(),
            qty_selector: ".item-qty".to_string(),
            line_total_selector: ".item-total".to_string(),
            total_selector: "#cart-total".to_string(),
            count_selector: "#cart-count".to_string(),
            container_selector: "[data-cart-container]".to_string(),
            notification_host_id: "cart-notifications".to_string(),
            empty_message: "Your cart is empty.".to_string(),
            currency_symbol: "$".to_string(),
            generic_error_message: "Something went wrong updating your cart.".to_string(),
            notice_duration_ms: 4000,
            discard_stale_responses: false,
            log_level: "info".to_string(),
        }
    }
}

impl CartSyncConfig {
    /// Parse configuration JSON, falling back to defaults on error.
    pub fn from_json(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("[CartSync] Invalid configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load from the configuration element of the current page.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) => Self::from_json(&raw),
            None => Self::default(),
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
