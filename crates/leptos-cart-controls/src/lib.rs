//! Leptos Cart Control Bindings
//!
//! Click handlers for controls rendered by the server rather than by Leptos.
//! Attributes are read when the click happens, so templates may change them
//! after binding.

use std::future::Future;
use std::rc::Rc;

use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Attribute names a control (or its row) carries
#[derive(Clone, Debug, PartialEq)]
pub struct ControlAttributes {
    /// Action requested by the control
    pub action: String,
    /// Item id, on the control or on its enclosing line
    pub item_id: String,
    /// Selector of an input holding the quantity
    pub qty_input: String,
    /// Literal quantity
    pub qty: String,
    /// Selector of the enclosing line element
    pub line_selector: String,
}

/// What a click asked for, unvalidated
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlClick {
    pub action: Option<String>,
    pub item_id: Option<String>,
    pub qty: Option<String>,
}

fn non_empty_attr(el: &web_sys::Element, name: &str) -> Option<String> {
    el.get_attribute(name).filter(|v| !v.trim().is_empty())
}

/// Read action, item id and quantity for `el`
pub fn read_control(el: &web_sys::Element, attrs: &ControlAttributes) -> ControlClick {
    let item_id = non_empty_attr(el, &attrs.item_id).or_else(|| {
        el.closest(&attrs.line_selector)
            .ok()
            .flatten()
            .and_then(|line| non_empty_attr(&line, &attrs.item_id))
    });

    let qty = match non_empty_attr(el, &attrs.qty_input) {
        Some(selector) => read_input_value(&selector),
        None => non_empty_attr(el, &attrs.qty),
    };

    ControlClick {
        action: non_empty_attr(el, &attrs.action),
        item_id,
        qty,
    }
}

fn read_input_value(selector: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let el = document.query_selector(selector).ok().flatten()?;
    match el.dyn_into::<web_sys::HtmlInputElement>() {
        Ok(input) => Some(input.value()),
        Err(_) => {
            log::warn!("[CartControls] '{}' is not an input", selector);
            None
        }
    }
}

/// Bind `on_click` to every element matching `selector`.
///
/// Each click runs one future on the local executor; clicks are never
/// queued or merged. Returns the number of controls bound.
pub fn bind_controls<F, Fut>(selector: &str, attrs: Rc<ControlAttributes>, on_click: F) -> usize
where
    F: Fn(ControlClick) -> Fut + Clone + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return 0;
    };
    let nodes = match document.query_selector_all(selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            log::error!("[CartControls] Bad control selector '{}': {:?}", selector, e);
            return 0;
        }
    };

    let mut bound = 0;
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
            continue;
        };
        let target = el.clone();
        let attrs = attrs.clone();
        let on_click = on_click.clone();
        let handler = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            ev.prevent_default();
            let click = read_control(&target, &attrs);
            spawn_local(on_click(click));
        });
        if el
            .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            bound += 1;
        }
        handler.forget();
    }
    bound
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const PAGE: &str = r##"
        <table>
          <tr data-cart-line data-item-id="A">
            <td><button id="dec-a" data-cart-action="decrease">-</button></td>
          </tr>
        </table>
        <button id="remove-b" data-cart-action="remove" data-item-id="B">x</button>
        <input id="qty-c" type="number" value="3" />
        <button id="add-c" data-cart-action="add" data-item-id="C" data-qty-input="#qty-c">Add</button>
        <button id="add-d" data-cart-action="add" data-item-id="D" data-qty="5">Add</button>
    "##;

    fn attrs() -> ControlAttributes {
        ControlAttributes {
            action: "data-cart-action".to_string(),
            item_id: "data-item-id".to_string(),
            qty_input: "data-qty-input".to_string(),
            qty: "data-qty".to_string(),
            line_selector: "[data-cart-line]".to_string(),
        }
    }

    fn control(id: &str) -> web_sys::Element {
        let document = web_sys::window().unwrap().document().unwrap();
        document.body().unwrap().set_inner_html(PAGE);
        document.get_element_by_id(id).unwrap()
    }

    #[wasm_bindgen_test]
    fn item_id_on_control() {
        let click = read_control(&control("remove-b"), &attrs());
        assert_eq!(click.action.as_deref(), Some("remove"));
        assert_eq!(click.item_id.as_deref(), Some("B"));
        assert_eq!(click.qty, None);
    }

    #[wasm_bindgen_test]
    fn item_id_from_enclosing_line() {
        let click = read_control(&control("dec-a"), &attrs());
        assert_eq!(click.action.as_deref(), Some("decrease"));
        assert_eq!(click.item_id.as_deref(), Some("A"));
    }

    #[wasm_bindgen_test]
    fn qty_from_referenced_input() {
        let click = read_control(&control("add-c"), &attrs());
        assert_eq!(click.item_id.as_deref(), Some("C"));
        assert_eq!(click.qty.as_deref(), Some("3"));
    }

    #[wasm_bindgen_test]
    fn qty_from_literal_attribute() {
        let click = read_control(&control("add-d"), &attrs());
        assert_eq!(click.item_id.as_deref(), Some("D"));
        assert_eq!(click.qty.as_deref(), Some("5"));
    }
}
