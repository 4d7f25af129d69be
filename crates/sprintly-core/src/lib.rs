//! sprintly-core: Domain model and terminal rendering engine.
//!
//! This crate provides:
//! - `Item`/`Product`: the work item model deserialized from the tracker feed
//! - `build_forest`: flat item sequence → ordered parent/child forest
//! - `Renderer`: `${NAME}` color templates with width-aware truncation
//! - `ListPrinter`: status/product grouping and line emission
//!
//! Everything here is a pure transformation: no network, no filesystem, no
//! shared state between calls.

pub mod forest;
pub mod item;
pub mod printer;
pub mod render;

pub use forest::build_forest;
pub use item::{Item, ItemStatus, ItemType, ParentRef, Product};
pub use printer::ListPrinter;
pub use render::{Renderer, Style, trim};
