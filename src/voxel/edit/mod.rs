//! Voxel edit history.
//!
//! Every interactive add or remove is recorded as a [`Step`] so it can be
//! undone in reverse order.

pub mod history;

pub use history::{EditHistory, Step};
