//! # Clausewise
//!
//! Workspace facade. Re-exports the [`clausewise`] pipeline crate so the
//! workspace root can host end-to-end and property tests.

pub use clausewise::*;
