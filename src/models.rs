//! Cart Models
//!
//! Request/response contract shared with the cart backend.

use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// Mutation a control can request for a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationAction {
    Increase,
    Decrease,
    Remove,
    Add,
}

impl MutationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationAction::Increase => "increase",
            MutationAction::Decrease => "decrease",
            MutationAction::Remove => "remove",
            MutationAction::Add => "add",
        }
    }
}

impl std::str::FromStr for MutationAction {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "increase" => Ok(MutationAction::Increase),
            "decrease" => Ok(MutationAction::Decrease),
            "remove" => Ok(MutationAction::Remove),
            "add" => Ok(MutationAction::Add),
            other => Err(CartError::UnknownAction(other.to_string())),
        }
    }
}

/// One validated mutation, alive for a single network call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub item_id: String,
    pub action: MutationAction,
    pub qty: Option<u32>,
}

impl MutationRequest {
    /// Validate raw control input into a request.
    pub fn parse(item_id: &str, action: &str, qty: Option<&str>) -> Result<Self, CartError> {
        let item_id = item_id.trim();
        if item_id.is_empty() {
            return Err(CartError::MissingItemId);
        }
        let action: MutationAction = action.parse()?;
        let qty = match qty.map(str::trim).filter(|q| !q.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<u32>() {
                Ok(q) if q >= 1 => Some(q),
                _ => return Err(CartError::InvalidQuantity(raw.to_string())),
            },
        };
        Ok(Self {
            item_id: item_id.to_string(),
            action,
            qty,
        })
    }
}

/// Body sent to the mutate endpoint (JSON or form-encoded)
#[derive(Debug, Serialize)]
pub struct MutationBody {
    pub action: MutationAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<u32>,
}

impl From<&MutationRequest> for MutationBody {
    fn from(request: &MutationRequest) -> Self {
        Self {
            action: request.action,
            qty: request.qty,
        }
    }
}

/// Raw response from the mutate endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default)]
    pub removed: bool,
    pub qty: Option<i64>,
    pub item_total: Option<f64>,
    pub cart_total: Option<f64>,
    pub cart_count: Option<u32>,
    pub product_name: Option<String>,
    pub error: Option<String>,
}

/// What a successful response means for the page
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// Line is gone (explicit removal or quantity reached zero)
    Removed { cart_total: f64 },
    /// Line still present with new values
    Updated { qty: u32, item_total: f64, cart_total: f64 },
    /// Add accepted without line data (no line rendered for it)
    Added { cart_total: f64 },
}

impl MutationOutcome {
    pub fn cart_total(&self) -> f64 {
        match self {
            MutationOutcome::Removed { cart_total }
            | MutationOutcome::Updated { cart_total, .. }
            | MutationOutcome::Added { cart_total } => *cart_total,
        }
    }
}

impl MutationResponse {
    /// Interpret the response for `action`.
    ///
    /// `success:false` becomes [`CartError::Rejected`]; a successful response
    /// that breaks the removed-or-line-data invariant is malformed.
    pub fn into_outcome(self, action: MutationAction) -> Result<MutationOutcome, CartError> {
        if !self.success {
            return Err(CartError::Rejected(self.error.unwrap_or_default()));
        }
        let cart_total = match self.cart_total {
            Some(total) if total.is_finite() && total >= 0.0 => total,
            Some(total) => return Err(CartError::MalformedResponse(format!("cartTotal {}", total))),
            None => return Err(CartError::MalformedResponse("missing cartTotal".into())),
        };
        if self.removed || self.qty == Some(0) {
            return Ok(MutationOutcome::Removed { cart_total });
        }
        match (self.qty, self.item_total) {
            (Some(qty), Some(item_total)) => {
                if qty < 0 || qty > u32::MAX as i64 {
                    return Err(CartError::MalformedResponse(format!("qty {}", qty)));
                }
                if !item_total.is_finite() || item_total < 0.0 {
                    return Err(CartError::MalformedResponse(format!("itemTotal {}", item_total)));
                }
                Ok(MutationOutcome::Updated { qty: qty as u32, item_total, cart_total })
            }
            (None, None) if action == MutationAction::Add => Ok(MutationOutcome::Added { cart_total }),
            _ => Err(CartError::MalformedResponse(
                "expected removed or qty/itemTotal".into(),
            )),
        }
    }
}

/// Render an amount as `<symbol><amount with 2 decimals>`.
pub fn format_money(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(qty: Option<i64>, item_total: Option<f64>, cart_total: f64) -> MutationResponse {
        MutationResponse {
            success: true,
            qty,
            item_total,
            cart_total: Some(cart_total),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_request() {
        let req = MutationRequest::parse(" 42 ", "decrease", None).unwrap();
        assert_eq!(req.item_id, "42");
        assert_eq!(req.action, MutationAction::Decrease);
        assert_eq!(req.qty, None);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            MutationRequest::parse("", "remove", None),
            Err(CartError::MissingItemId)
        ));
        assert!(matches!(
            MutationRequest::parse("7", "reduce", None),
            Err(CartError::UnknownAction(a)) if a == "reduce"
        ));
        assert!(matches!(
            MutationRequest::parse("7", "add", Some("0")),
            Err(CartError::InvalidQuantity(q)) if q == "0"
        ));
        assert!(matches!(
            MutationRequest::parse("7", "add", Some("two")),
            Err(CartError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_parse_qty() {
        let req = MutationRequest::parse("7", "add", Some(" 3 ")).unwrap();
        assert_eq!(req.qty, Some(3));
        let req = MutationRequest::parse("7", "add", Some("")).unwrap();
        assert_eq!(req.qty, None);
    }

    #[test]
    fn test_response_decodes_camel_case() {
        let json = r#"{"success":true,"removed":false,"qty":1,"itemTotal":10.0,"cartTotal":20.0}"#;
        let resp: MutationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.qty, Some(1));
        assert_eq!(resp.item_total, Some(10.0));
        assert_eq!(resp.cart_total, Some(20.0));
        assert!(!resp.removed);
    }

    #[test]
    fn test_outcome_updated() {
        let outcome = ok(Some(1), Some(10.0), 20.0)
            .into_outcome(MutationAction::Decrease)
            .unwrap();
        assert_eq!(
            outcome,
            MutationOutcome::Updated { qty: 1, item_total: 10.0, cart_total: 20.0 }
        );
    }

    #[test]
    fn test_zero_qty_counts_as_removal() {
        let outcome = ok(Some(0), Some(0.0), 5.0)
            .into_outcome(MutationAction::Decrease)
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Removed { cart_total: 5.0 });
    }

    #[test]
    fn test_removed_flag_wins() {
        let resp = MutationResponse {
            success: true,
            removed: true,
            cart_total: Some(0.0),
            ..Default::default()
        };
        assert_eq!(
            resp.into_outcome(MutationAction::Remove).unwrap(),
            MutationOutcome::Removed { cart_total: 0.0 }
        );
    }

    #[test]
    fn test_add_without_line_data() {
        let outcome = ok(None, None, 42.5).into_outcome(MutationAction::Add).unwrap();
        assert_eq!(outcome, MutationOutcome::Added { cart_total: 42.5 });
    }

    #[test]
    fn test_missing_line_data_is_malformed() {
        let err = ok(None, None, 1.0).into_outcome(MutationAction::Increase).unwrap_err();
        assert!(matches!(err, CartError::MalformedResponse(_)));

        let err = ok(Some(2), None, 1.0).into_outcome(MutationAction::Add).unwrap_err();
        assert!(matches!(err, CartError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_cart_total_is_malformed() {
        let resp = MutationResponse {
            success: true,
            removed: true,
            ..Default::default()
        };
        assert!(matches!(
            resp.into_outcome(MutationAction::Remove),
            Err(CartError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_failure_carries_server_error() {
        let resp: MutationResponse =
            serde_json::from_str(r#"{"success":false,"error":"Out of stock"}"#).unwrap();
        match resp.into_outcome(MutationAction::Increase) {
            Err(CartError::Rejected(msg)) => assert_eq!(msg, "Out of stock"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("$", 10.0), "$10.00");
        assert_eq!(format_money("$", 0.0), "$0.00");
        assert_eq!(format_money("€", 3.456), "€3.46");
    }
}
