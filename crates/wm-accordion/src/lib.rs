//! Animated disclosure accordion for Webmark pages
//!
//! Coordinates the open/close animations of a group of `<details>`
//! elements and keeps at most one of them open.
//!
//! ## Architecture
//!
//! - [`controller`]: per-item state machine and the single-open rule
//! - [`transition`]: body keyframes and durations
//! - [`easing`]: cubic Bézier timing
//! - [`config`]: selectors and timing options
//!
//! The browser side (`wasm` feature) implements [`DisclosureHost`] over live
//! elements with the Web Animations API and exports `initAccordion`.
//!
//! ## Example
//!
//! ```rust
//! use wm_accordion::{AccordionController, AccordionOptions, BodyTransition, DisclosureHost, ItemId, TransitionToken};
//!
//! struct Page { open: Vec<bool> }
//!
//! impl DisclosureHost for Page {
//!     type Transition = ();
//!     fn item_count(&self) -> usize { self.open.len() }
//!     fn is_open(&self, item: ItemId) -> bool { self.open[item] }
//!     fn has_body(&self, _: ItemId) -> bool { false }
//!     fn prefers_reduced_motion(&self) -> bool { false }
//!     fn set_open(&mut self, item: ItemId, open: bool) { self.open[item] = open; }
//!     fn rendered_height(&self, _: ItemId) -> f64 { 0.0 }
//!     fn natural_height(&self, _: ItemId) -> f64 { 0.0 }
//!     fn start_transition(&mut self, _: ItemId, _: &BodyTransition, _: TransitionToken) -> Option<()> { None }
//!     fn cancel_transition(&mut self, _: ItemId, _: ()) {}
//!     fn clear_transition_styles(&mut self, _: ItemId) {}
//! }
//!
//! let mut accordion = AccordionController::new(Page { open: vec![false, false] }, AccordionOptions::default());
//! accordion.toggle(0);
//! accordion.toggle(1);
//! assert!(!accordion.is_open(0));
//! assert!(accordion.is_open(1));
//! ```

pub mod config;
pub mod controller;
pub mod easing;
pub mod transition;

// DOM host and WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod dom;
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use dom::{DomDisclosureHost, DomItem, DomTransition};
#[cfg(feature = "wasm")]
pub use wasm::*;

pub use config::{AccordionOptions, ConfigError};
pub use controller::{AccordionController, DisclosureHost, ItemId, ItemState, TransitionToken};
pub use easing::{CubicBezier, EASE_EMPHASIZED};
pub use transition::{
    close_duration_ms, BodyFrame, BodyTransition, TransitionDirection, MAX_CLOSE_DURATION_MS,
    MIN_CLOSE_DURATION_MS, OPEN_DURATION_MS,
};
