//! Notification Host Component
//!
//! Stack of cart notices, newest at the bottom. Click to dismiss.

use leptos::prelude::*;

use crate::context::Notifier;
use crate::store::NoticeStateStoreFields;
use crate::view::NoticeKind;

#[component]
pub fn NotificationHost(notifier: Notifier) -> impl IntoView {
    let store = notifier.store();

    view! {
        <div class="cart-notices" role="status" aria-live="polite">
            <For
                each=move || store.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    let class = match notice.kind {
                        NoticeKind::Success => "cart-notice success",
                        NoticeKind::Error => "cart-notice error",
                    };
                    view! {
                        <div class=class on:click=move |_| notifier.dismiss(id)>
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
