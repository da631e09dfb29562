//! Notification State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::view::{Notice, NoticeKind};

/// One notice on screen
#[derive(Clone, Debug, PartialEq)]
pub struct NoticeEntry {
    pub id: u32,
    pub kind: NoticeKind,
    pub message: String,
}

/// Notices currently shown, oldest first
#[derive(Clone, Debug, Default, Store)]
pub struct NoticeState {
    pub notices: Vec<NoticeEntry>,
    /// Last id handed out
    pub next_id: u32,
}

/// Type alias for the store
pub type NoticeStore = Store<NoticeState>;

// ========================
// Store Helper Functions
// ========================

/// Push a notice and return its id
pub fn store_push_notice(store: &NoticeStore, notice: Notice) -> u32 {
    let id = {
        let field = store.next_id();
        let mut next_id = field.write();
        *next_id += 1;
        *next_id
    };
    store.notices().write().push(NoticeEntry {
        id,
        kind: notice.kind,
        message: notice.message,
    });
    id
}

/// Remove a notice by ID
pub fn store_remove_notice(store: &NoticeStore, notice_id: u32) {
    store.notices().write().retain(|notice| notice.id != notice_id);
}
