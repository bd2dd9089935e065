//! Structured error and warning reporting for architecture checks.
//!
//! A [`Diagnostic`] couples a [`Severity`], a stable [`DiagnosticCode`], a
//! message and the [`Span`](archsb_source::Span) of the offending element.
//! Checks push diagnostics into a [`DiagnosticSink`]; the CLI drains the sink
//! and renders each entry with a [`DiagnosticRenderer`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
