//! UI Components
//!
//! Leptos components mounted into the server-rendered page.

mod notification_host;

pub use notification_host::NotificationHost;
