//! Adapter utilities for the `revealer` crate.
//!
//! The `revealer` crate holds the engines and their state machines. This crate provides the
//! framework-neutral glue most hosts need:
//!
//! - A [`Controller`] that owns a page model, runs geometric intersection observers against
//!   it, and records output marker writes
//! - Aggregated [`EngineOptions`]
//! - The lazy embed loader for social cards ([`SocialCard`])
//!
//! This crate does not bind to any UI toolkit; see `revealer-web` for browser bindings.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod embed;
mod key;
mod markers;
mod options;
mod page;


pub use controller::Controller;
pub use embed::{
    CardAction, EMBED_ALLOW, EMBED_FRAME_CLASS, EMBED_WRAP_CLASS, LOADED_ATTRIBUTE,
    NEW_CONTEXT_FEATURES, NEW_CONTEXT_TARGET, SocialCard, is_activation_key,
};
pub use markers::{MarkerChange, Markers};
pub use options::EngineOptions;
pub use page::{Page, Targets};
