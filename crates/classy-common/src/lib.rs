//! Common types and utilities for the classy type-class compiler front-end.
//!
//! This crate provides foundational types used across all `classy` crates:
//! - String interning (`Atom`, `Interner`)
//! - The four disjoint name namespaces (`ValueName`, `TypeVarName`,
//!   `TypeConName`, `LabelName`)
//! - Source spans (`Span`)
//! - The `ClassyError` diagnostic taxonomy
//! - Compiler limits and thresholds
//! - `tracing` initialization for CLI binaries

pub mod interner;
pub use interner::{Atom, Interner};

pub mod span;
pub use span::Span;

pub mod names;
pub use names::{LabelName, TypeConName, TypeVarName, ValueName, WellKnownNames};

pub mod diagnostics;
pub use diagnostics::{ClassyError, ReportStyle};

pub mod limits;

pub mod tracing_init;
