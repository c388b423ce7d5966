//! Shared test utilities used across meshcut crates.
//!
//! - [`tracing`]: a recording layer for asserting spans and events;
//! - [`logging`]: opt-in human-readable test logging;
//! - [`proptest_profile`]: environment-driven property-test tuning;
//! - [`topologies`]: small mesh topologies with known answers.

pub mod logging;
pub mod proptest_profile;
pub mod topologies;
pub mod tracing;
