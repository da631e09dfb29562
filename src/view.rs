//! Cart View Interface
//!
//! The mutation logic only touches the page through [`CartView`].

/// Visual flavour of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A user-visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

/// Page operations applied after a mutation response
pub trait CartView {
    /// Set the quantity and line total of one line
    fn apply_line_update(&self, item_id: &str, qty: u32, item_total: f64);
    /// Delete one line from the page
    fn remove_line(&self, item_id: &str);
    /// Set the aggregate cart total
    fn set_total(&self, cart_total: f64);
    /// Replace the cart container with the empty-cart message
    fn show_empty_state(&self);
    /// Number of lines still rendered
    fn line_count(&self) -> usize;
    /// Set the cart badge count
    fn set_cart_count(&self, count: u32);
    fn notify(&self, notice: Notice);
}
