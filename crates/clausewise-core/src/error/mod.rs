//! Error Types
//!
//! This module defines the error types for domain-specific failures across
//! the Clausewise pipeline. Errors are split by concern:
//! - `document`: missing, unsupported or empty input documents
//! - `model`: inference backend failures (always recovered by a fallback)
//! - `knowledge`: invalid knowledge tables
//! - `conversions`: the umbrella error and its `From` conversions

mod conversions;
mod document;
mod knowledge;
mod model;

pub use conversions::{ClausewiseError, ClausewiseResult};
pub use document::{DocumentError, DocumentResult};
pub use knowledge::{KnowledgeError, KnowledgeResult};
pub use model::{ModelError, ModelResult};
