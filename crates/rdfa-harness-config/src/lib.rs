// crates/rdfa-harness-config/src/lib.rs
// ============================================================================
// Module: RDFa Harness Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for rdfa-harness.toml semantics.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! `rdfa-harness-config` defines the configuration model for the harness
//! server and CLI, with strict, fail-closed validation.
//!
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
