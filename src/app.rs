//! Cart Sync App
//!
//! Wires the client to the page and renders the notice stack.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_cart_controls::{bind_controls, ControlAttributes};
use reactive_stores::Store;

use crate::client::CartSyncClient;
use crate::commands::FetchTransport;
use crate::components::NotificationHost;
use crate::config::CartSyncConfig;
use crate::context::Notifier;
use crate::dom::DomCartView;
use crate::store::NoticeState;

fn control_attributes(config: &CartSyncConfig) -> ControlAttributes {
    ControlAttributes {
        action: config.action_attribute.clone(),
        item_id: config.item_id_attribute.clone(),
        qty_input: config.qty_input_attribute.clone(),
        qty: config.qty_attribute.clone(),
        line_selector: config.line_selector.clone(),
    }
}

#[component]
pub fn CartSyncApp(config: Rc<CartSyncConfig>) -> impl IntoView {
    let notifier = Notifier::new(Store::new(NoticeState::default()), config.notice_duration_ms);

    let client = Rc::new(CartSyncClient::new(
        FetchTransport::new(config.clone()),
        DomCartView::new(config.clone(), notifier),
        config.generic_error_message.clone(),
        config.discard_stale_responses,
    ));

    let bound = bind_controls(
        &config.control_selector,
        Rc::new(control_attributes(&config)),
        move |click| {
            let client = client.clone();
            async move {
                // Failures are already shown as notices
                let _ = client
                    .submit_mutation(
                        click.item_id.as_deref().unwrap_or_default(),
                        click.action.as_deref().unwrap_or_default(),
                        click.qty.as_deref(),
                    )
                    .await;
            }
        },
    );
    log::info!("[CartSync] Bound {} cart controls", bound);

    view! { <NotificationHost notifier=notifier /> }
}
