//! Browser bindings for the `revealer` engines.
//!
//! [`install`] reads the page through a set of [`Selectors`], registers one platform
//! `IntersectionObserver` per engine (reveal, hero heading, navigation band), a passive scroll
//! listener coalesced through `requestAnimationFrame`, and click/keyboard handlers on social
//! cards. Engine decisions are written back as marker classes and inline styles:
//!
//! - `visible` on revealed elements, `hidden` on the hero overlay(s)
//! - `width: N%` on the progress bar, `scrolled` on the header
//! - `background-position` on the parallax target
//! - `active` on the navigation link of the section in the tracking band, `in-view` on
//!   sections inside it
//!
//! From JavaScript, call `installRevealer()`; it installs once the document is parsed and keeps
//! the page wired for its lifetime.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod bindings;
mod dom;
mod embed;
mod listener;
mod page;
mod selectors;

#[cfg(test)]
mod tests;

use revealer_adapter::EngineOptions;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

pub use page::PageHandle;
pub use selectors::{SOURCE_ATTRIBUTE, STAGGER_ATTRIBUTE, Selectors, class};

/// Wires the page with default engine options.
pub fn install(selectors: &Selectors) -> Result<PageHandle, JsValue> {
    install_with_options(selectors, EngineOptions::default())
}

/// Wires the page.
///
/// Components whose elements are missing are skipped. Fails only when the platform rejects a
/// selector or an observer.
pub fn install_with_options(
    selectors: &Selectors,
    options: EngineOptions,
) -> Result<PageHandle, JsValue> {
    page::install(selectors, options)
}

/// JavaScript entry point: installs with the default selectors for the lifetime of the page.
#[wasm_bindgen(js_name = installRevealer)]
pub fn install_revealer() -> Result<(), JsValue> {
    let document = dom::document(&dom::window()?)?;
    if document.ready_state() != "loading" {
        return install_forever();
    }
    let on_ready = Closure::once_into_js(|| {
        if let Err(_err) = install_forever() {
            wwarn!(err = ?_err, "installRevealer failed");
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

fn install_forever() -> Result<(), JsValue> {
    let handle = install(&Selectors::default())?;
    core::mem::forget(handle);
    Ok(())
}
