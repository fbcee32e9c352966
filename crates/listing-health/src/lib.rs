//! Profile health auditing for local business listings.
//!
//! The [`audit`] module carries the full pipeline: normalized listing
//! signals go through review analysis and per-category scorers, the
//! weighted aggregate produces an overall score, and the synthesizer
//! orders the remediation recommendations. The service type in
//! [`audit::service`] gates runs on credit balance and persists results
//! through the repository abstraction.

pub mod audit;
pub mod config;
pub mod error;
pub mod telemetry;
