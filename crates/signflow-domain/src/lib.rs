//! Signflow Domain Layer
//!
//! This crate contains the value types shared by every other Signflow crate.
//! It holds no I/O and no parsing logic; it defines the intermediate
//! representation produced by the extractor and consumed by the payload
//! builder, plus the trait seams for infrastructure.
//!
//! ## Key Concepts
//!
//! - **WorkflowIr**: normalized extraction output (documents, signers, e-mail bindings)
//! - **Signer**: one invitee with a label, signature method, optional e-mail and signing level
//! - **SignatureMethod**: which identity-verification block a signer receives
//! - **ExtractionFallback**: a degraded-but-valid extraction path that was taken
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ir;
pub mod signer;
pub mod traits;

// Re-exports for convenience
pub use ir::{
    DocumentSource, EmailAssignments, ExtractionFallback, SignerRef, SignerSource, WorkflowIr,
};
pub use signer::{SignatureMethod, Signer};
