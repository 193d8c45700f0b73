//! Test harness for the bounding-box layout engine.
//!
//! Provides the reference configurator models, verification oracles and
//! diagnostic assertions used by the end-to-end scenarios.
//!
//! # Key Components
//!
//! - [`helpers`]: error type and configurator model builders
//! - [`oracle`]: layout checks returning pass/fail verdicts
//! - [`assertions`]: `Result`-returning assertions with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
