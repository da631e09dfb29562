//! Notification Context
//!
//! Handle for posting notices from outside the Leptos view tree.

use leptos::task::spawn_local;

use crate::store::{store_push_notice, store_remove_notice, NoticeStore};
use crate::view::Notice;

#[derive(Clone, Copy)]
pub struct Notifier {
    store: NoticeStore,
    /// Auto-dismiss delay, 0 keeps notices until clicked
    duration_ms: u32,
}

impl Notifier {
    pub fn new(store: NoticeStore, duration_ms: u32) -> Self {
        Self { store, duration_ms }
    }

    pub fn store(&self) -> NoticeStore {
        self.store
    }

    /// Show a notice and schedule its removal
    pub fn notify(&self, notice: Notice) {
        let id = store_push_notice(&self.store, notice);
        if self.duration_ms == 0 {
            return;
        }
        let store = self.store;
        let duration_ms = self.duration_ms;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(duration_ms).await;
            store_remove_notice(&store, id);
        });
    }

    pub fn dismiss(&self, notice_id: u32) {
        store_remove_notice(&self.store, notice_id);
    }
}
