//! DOM Cart View
//!
//! [`CartView`] over the server-rendered cart markup.

use std::rc::Rc;

use wasm_bindgen::JsCast;

use crate::config::CartSyncConfig;
use crate::context::Notifier;
use crate::models::format_money;
use crate::view::{CartView, Notice};

pub struct DomCartView {
    config: Rc<CartSyncConfig>,
    notifier: Notifier,
}

impl DomCartView {
    pub fn new(config: Rc<CartSyncConfig>, notifier: Notifier) -> Self {
        Self { config, notifier }
    }

    fn document(&self) -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn lines(&self) -> Vec<web_sys::Element> {
        let Some(nodes) = self
            .document()
            .and_then(|d| d.query_selector_all(&self.config.line_selector).ok())
        else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|n| n.dyn_into::<web_sys::Element>().ok())
            .collect()
    }

    fn find_line(&self, item_id: &str) -> Option<web_sys::Element> {
        let found = self.lines().into_iter().find(|line| {
            line.get_attribute(&self.config.item_id_attribute).as_deref() == Some(item_id)
        });
        if found.is_none() {
            log::debug!("[CartSync] No line rendered for item {}", item_id);
        }
        found
    }

    fn set_text(&self, selector: &str, text: &str) {
        match self.document().and_then(|d| d.query_selector(selector).ok().flatten()) {
            Some(el) => el.set_text_content(Some(text)),
            None => log::debug!("[CartSync] '{}' not on this page", selector),
        }
    }
}

impl CartView for DomCartView {
    fn apply_line_update(&self, item_id: &str, qty: u32, item_total: f64) {
        let Some(line) = self.find_line(item_id) else {
            return;
        };
        if let Ok(Some(cell)) = line.query_selector(&self.config.qty_selector) {
            cell.set_text_content(Some(&qty.to_string()));
        }
        if let Ok(Some(cell)) = line.query_selector(&self.config.line_total_selector) {
            cell.set_text_content(Some(&format_money(&self.config.currency_symbol, item_total)));
        }
    }

    fn remove_line(&self, item_id: &str) {
        if let Some(line) = self.find_line(item_id) {
            line.remove();
        }
    }

    fn set_total(&self, cart_total: f64) {
        let text = format_money(&self.config.currency_symbol, cart_total);
        self.set_text(&self.config.total_selector, &text);
    }

    fn show_empty_state(&self) {
        let Some(document) = self.document() else {
            return;
        };
        let Ok(Some(container)) = document.query_selector(&self.config.container_selector) else {
            log::warn!("[CartSync] Cart container '{}' not found", self.config.container_selector);
            return;
        };
        let placeholder = match document.create_element("p") {
            Ok(p) => p,
            Err(e) => {
                log::error!("[CartSync] Cannot create empty-cart message: {:?}", e);
                return;
            }
        };
        placeholder.set_class_name("cart-empty");
        placeholder.set_text_content(Some(&self.config.empty_message));
        if let Err(e) = container.replace_with_with_node_1(&placeholder) {
            log::error!("[CartSync] Cannot replace cart container: {:?}", e);
        }
    }

    fn line_count(&self) -> usize {
        self.lines().len()
    }

    fn set_cart_count(&self, count: u32) {
        self.set_text(&self.config.count_selector, &count.to_string());
    }

    fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::store::NoticeState;
    use reactive_stores::Store;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const CART: &str = r#"
        <table data-cart-container>
          <tbody>
            <tr data-cart-line data-item-id="A"><td class="item-qty">2</td><td class="item-total">$20.00</td></tr>
            <tr data-cart-line data-item-id="B"><td class="item-qty">1</td><td class="item-total">$10.00</td></tr>
          </tbody>
        </table>
        <span id="cart-total">$30.00</span>
    "#;

    fn setup() -> (web_sys::Document, DomCartView) {
        let document = web_sys::window().unwrap().document().unwrap();
        document.body().unwrap().set_inner_html(CART);
        let notifier = Notifier::new(Store::new(NoticeState::default()), 0);
        (document, DomCartView::new(Rc::new(CartSyncConfig::default()), notifier))
    }

    fn text(document: &web_sys::Document, selector: &str) -> Option<String> {
        document.query_selector(selector).unwrap().and_then(|el| el.text_content())
    }

    #[wasm_bindgen_test]
    fn updates_one_line_and_total() {
        let (document, view) = setup();

        view.apply_line_update("A", 1, 10.0);
        view.set_total(20.0);

        assert_eq!(text(&document, "[data-item-id='A'] .item-qty").as_deref(), Some("1"));
        assert_eq!(text(&document, "[data-item-id='A'] .item-total").as_deref(), Some("$10.00"));
        assert_eq!(text(&document, "[data-item-id='B'] .item-qty").as_deref(), Some("1"));
        assert_eq!(text(&document, "#cart-total").as_deref(), Some("$20.00"));
    }

    #[wasm_bindgen_test]
    fn empty_state_replaces_container() {
        let (document, view) = setup();

        view.remove_line("A");
        view.remove_line("B");
        assert_eq!(view.line_count(), 0);
        view.show_empty_state();

        assert!(document.query_selector("[data-cart-container]").unwrap().is_none());
        assert_eq!(text(&document, ".cart-empty").as_deref(), Some("Your cart is empty."));
    }
}
