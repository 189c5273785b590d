//! Common types and utilities for the tsdecl declaration extractor.
//!
//! This crate provides foundational types used across all tsdecl crates:
//! - Source spans (`Span`)
//! - Line/column positions (`LineMap`, `Position`)
//! - Diagnostics shared by the scanner, parser and binder
//! - Parser recursion limits

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticKind};

// Centralized limits and thresholds
pub mod limits;
