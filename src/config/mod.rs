//! Configuration module for anonymized scans
//!
//! This module provides the `ScanConfig` struct and its type-safe builder
//! for configuring a run with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{ScanConfigBuilder, WithTargetsFile};
pub use types::ScanConfig;
