//! Tooling primitives for arbor behavior trees.
//!
//! Trace events are recorded through the evaluating instance's blackboard so each agent's trace
//! stays isolated. Richer inspectors should live in dedicated adapter crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{emit, TraceEvent, TraceLog, TraceSink, TracingSink, TRACE_LOG, TRACE_SINK};
