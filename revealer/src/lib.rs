//! A headless engine for viewport-driven page state.
//!
//! For a framework-neutral controller that wires the engines to a page model, see the
//! `revealer-adapter` crate. For browser bindings, see `revealer-web`.
//!
//! This crate decides, purely from viewport geometry and scroll position:
//! - when elements transition into a revealed state (optionally staggered per group)
//! - when a fallback overlay may be hidden (its heading is in view *and* revealed)
//! - which navigation entry is active (the section inside a mid-viewport tracking band)
//! - scroll-derived visual parameters (progress, header state, parallax offset), coalesced
//!   to at most one recomputation per frame
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - intersection batches (from a platform observer, or from [`IntersectionObserver`])
//! - attribute-change notifications for watched elements
//! - scroll notifications, frame callbacks, and a millisecond clock
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod hero;
mod key;
mod margin;
mod metrics;
mod mutation;
mod nav;
mod observer;
mod reveal;
mod scheduler;
mod timer;
mod types;

#[cfg(test)]
mod tests;

pub use hero::{FallbackState, HeroFallback, HeroOptions, OverlayChange};
pub use key::ElementKey;
pub use margin::{Length, ParseMarginError, RootMargin};
pub use metrics::{MetricsOptions, ScrollMetrics, ScrollMetricsEngine};
pub use mutation::AttributeWatch;
pub use nav::{NavEntry, NavOptions, NavUpdate, NavigationTracker};
pub use observer::{IntersectionEntry, IntersectionObserver, ObserverOptions, intersection_ratio};
pub use reveal::{RevealEngine, RevealKind, RevealOptions};
pub use scheduler::FrameScheduler;
pub use timer::TimerQueue;
pub use types::{Band, Bounds, Viewport};
