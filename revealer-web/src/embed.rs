use revealer_adapter::{
    CardAction, EMBED_ALLOW, EMBED_FRAME_CLASS, EMBED_WRAP_CLASS, LOADED_ATTRIBUTE,
    NEW_CONTEXT_FEATURES, NEW_CONTEXT_TARGET, SocialCard, is_activation_key,
};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, KeyboardEvent};

use crate::dom;
use crate::listener::EventListener;
use crate::selectors::{SOURCE_ATTRIBUTE, class};

/// Reads a card's current state from the page.
fn read_card(el: &Element) -> SocialCard {
    SocialCard {
        src: el.get_attribute(SOURCE_ATTRIBUTE),
        redirect: dom::has_class(el, class::REDIRECT),
        is_link: el.tag_name().eq_ignore_ascii_case("a"),
        href: el.get_attribute("href"),
        first_link_href: el
            .query_selector("a")
            .ok()
            .flatten()
            .and_then(|a| a.get_attribute("href")),
        loaded: el.has_attribute(LOADED_ATTRIBUTE),
    }
}

fn inject_embed(document: &Document, card: &Element, src: &str) -> Result<(), JsValue> {
    let wrap = document.create_element("div")?;
    wrap.set_class_name(EMBED_WRAP_CLASS);

    let frame = document.create_element("iframe")?;
    frame.set_class_name(EMBED_FRAME_CLASS);
    frame.set_attribute("src", src)?;
    frame.set_attribute("allow", EMBED_ALLOW)?;
    frame.set_attribute("allowfullscreen", "")?;

    wrap.append_child(&frame)?;
    card.append_child(&wrap)?;
    card.set_attribute(LOADED_ATTRIBUTE, "1")
}

fn activate(document: &Document, el: &Element) {
    let result = match read_card(el).activate() {
        CardAction::InjectEmbed(src) => inject_embed(document, el, &src),
        CardAction::OpenInNewContext(url) => dom::window().and_then(|w| {
            w.open_with_url_and_target_and_features(&url, NEW_CONTEXT_TARGET, NEW_CONTEXT_FEATURES)
                .map(drop)
        }),
        CardAction::Native | CardAction::Nothing => Ok(()),
    };
    if let Err(_err) = result {
        wwarn!(err = ?_err, "social card activation failed");
    }
}

/// Wires click and keyboard activation on every card.
pub(crate) fn install_cards(
    document: &Document,
    selector: &str,
) -> Result<Vec<EventListener>, JsValue> {
    let cards = dom::query_all(document, selector)?;
    wdebug!(cards = cards.len(), "installing social cards");
    let mut listeners = Vec::with_capacity(cards.len() * 2);
    for card in cards {
        let target: &web_sys::EventTarget = card.as_ref();

        let (doc, el) = (document.clone(), card.clone());
        listeners.push(EventListener::new(target, "click", false, move |_e: Event| {
            activate(&doc, &el);
        })?);

        let (doc, el) = (document.clone(), card.clone());
        listeners.push(EventListener::new(target, "keydown", false, move |e: Event| {
            let Some(key) = e.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            if is_activation_key(&key) {
                e.prevent_default();
                activate(&doc, &el);
            }
        })?);
    }
    Ok(listeners)
}
