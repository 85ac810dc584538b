//! Signflow Payload Builder
//!
//! Builds the deeply nested request body the workflow service expects from a
//! [`WorkflowIr`](signflow_domain::WorkflowIr). The body has three parts:
//!
//! - `workflowData`: documents, invitee cards and pack metadata
//! - `dynamicProperties`: a field-descriptor tree mirroring `workflowData`
//!   for the service's form renderer
//! - `rules`: always empty
//!
//! Every signer is wired to every document, so N documents and M signers
//! produce M×N document assignments.
//!
//! # Example
//!
//! ```
//! use signflow_extractor::Extractor;
//! use signflow_payload::PayloadBuilder;
//!
//! let ir = Extractor::default().extract("Create workflow with 2 documents A and B");
//! let payload = PayloadBuilder::default().build(&ir);
//!
//! assert_eq!(payload.document_count(), 2);
//! assert_eq!(payload.invitee_count(), 2);
//! assert_eq!(payload.assignment_count(), 4);
//! ```

#![warn(missing_docs)]

mod builder;
mod config;
pub mod descriptors;
mod error;
pub mod esign;
mod model;

pub use builder::PayloadBuilder;
pub use config::PayloadConfig;
pub use error::PayloadError;
pub use esign::EsignTypes;
pub use model::{
    AssignedDocument, Combination, CombinationSettings, DocumentBlock, InviteeCard,
    InviteeCardBlock, InviteeDetail, InviteeSettings, Invitees, Pack, SecurityOptions, StampSeries,
    Stamps, WorkflowData, WorkflowPayload,
};
