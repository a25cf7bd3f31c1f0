//! Genea core domain types, enums, events, and shared error types.
//!
//! This crate contains the foundational types used across all other Genea
//! crates: the genealogical entities, the `GenDate` value object, the closed
//! domain-event taxonomy with its codec, and the workspace-wide error enum.
//! It has no internal dependencies on other workspace crates.

pub mod apply;
pub mod enums;
pub mod error;
pub mod event;
pub mod gendate;
pub mod types;

mod b64;

pub use enums::*;
pub use error::GeneaError;
pub use gendate::{DateParts, DateQualifier, GenDate};
