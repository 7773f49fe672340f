use revealer::{Bounds, Viewport};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

/// Attribute holding an element's registry key.
pub(crate) const KEY_ATTRIBUTE: &str = "data-revealer-key";

/// Maps page elements to the `u32` keys the engines work with.
///
/// Keys are dense indices, stamped onto the element so callbacks can map a platform entry
/// back without a reverse lookup table.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    elements: Vec<Element>,
}

impl Registry {
    /// Returns the element's key, registering it on first use.
    pub(crate) fn key_of(&mut self, el: &Element) -> u32 {
        if let Some(key) = self.lookup(el) {
            return key;
        }
        let key = u32::try_from(self.elements.len()).unwrap_or(u32::MAX);
        let _ = el.set_attribute(KEY_ATTRIBUTE, &key.to_string());
        self.elements.push(el.clone());
        key
    }

    pub(crate) fn lookup(&self, el: &Element) -> Option<u32> {
        let key: u32 = el.get_attribute(KEY_ATTRIBUTE)?.parse().ok()?;
        let known = self.elements.get(key as usize)?;
        (known == el).then_some(key)
    }

    pub(crate) fn element(&self, key: u32) -> Option<&Element> {
        self.elements.get(key as usize)
    }

    /// Whether the element behind `key` is still attached to the document.
    pub(crate) fn is_alive(&self, key: u32) -> bool {
        self.element(key).is_some_and(|el| el.is_connected())
    }
}

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("revealer-web: no global window"))
}

pub(crate) fn document(window: &Window) -> Result<Document, JsValue> {
    window
        .document()
        .ok_or_else(|| JsValue::from_str("revealer-web: window has no document"))
}

pub(crate) fn query(document: &Document, selector: &str) -> Result<Option<Element>, JsValue> {
    document.query_selector(selector)
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub(crate) fn children(el: &Element) -> Vec<Element> {
    let list = el.children();
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

pub(crate) fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

pub(crate) fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub(crate) fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

/// Current scroll geometry of the window.
pub(crate) fn viewport(window: &Window, document: &Document) -> Viewport {
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let scroll = window.scroll_y().unwrap_or(0.0);
    let document_height = document
        .document_element()
        .map_or(height, |el| f64::from(el.scroll_height()));
    Viewport::new(scroll, height, document_height)
}

/// Viewport-relative bounds, as `getBoundingClientRect` reports them.
pub(crate) fn client_bounds(el: &Element) -> Bounds {
    let rect = el.get_bounding_client_rect();
    Bounds::new(rect.top(), rect.height())
}

/// Progress bar width.
pub(crate) fn percent(value: f64) -> String {
    format!("{value}%")
}

/// Background position of the parallax target.
pub(crate) fn parallax_position(offset: f64) -> String {
    format!("center calc(50% + {offset}px)")
}
