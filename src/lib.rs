//! Decision engine for in-progress relocation/visa cases.
//!
//! Three stateless transforms over a parsed record set: the categorizer
//! partitions cases into operational work queues, the alert engine flags
//! cases past their landing thresholds, and the matcher cross-references
//! two independent exports by (name, visa step).

pub mod alerts;
pub mod config;
pub mod error;
pub mod matching;
pub mod records;
pub mod report;
pub mod telemetry;
pub mod triage;
