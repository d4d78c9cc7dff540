//! Adapter utilities for the `gridvirt` crate.
//!
//! The `gridvirt` engine assumes sanitized input and knows nothing about UI events. This crate
//! sits in front of it:
//!
//! - [`RawGridConfig`]: the raw configuration contract (every field optional), sanitized into
//!   engine options with fallbacks and a warning per invalid value
//! - [`GridController`]: a framework-neutral owner of a `GridVirtualizer` that UI hosts drive
//!   with scroll/resize/config events, and that tells the host when to write a corrected
//!   scroll offset back to its scroll surface
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui/DOM bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod config;
mod controller;

#[cfg(test)]
mod tests;

pub use config::{
    ConfigField, ConfigWarning, DEFAULT_OVERSCAN, RawGridConfig, RawSize, SanitizedConfig,
};
pub use controller::{ConfigUpdate, GridController, RenderFn};
