// crates/rdfa-harness-core/src/core/mod.rs
// ============================================================================
// Module: RDFa Harness Core Types
// Description: Identifiers and record types for the harness domain.
// Purpose: Group the value types shared across components.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Value types for test cases, classifications, syntax families, and
//! verification outcomes.

pub mod identifiers;
pub mod record;

pub use identifiers::Classification;
pub use identifiers::DocumentFormat;
pub use identifiers::HostLanguage;
pub use identifiers::TestNumber;
pub use record::ExpectedResult;
pub use record::TestDetails;
pub use record::TestRecord;
pub use record::VerificationOutcome;
