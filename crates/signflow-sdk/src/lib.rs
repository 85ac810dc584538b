//! Signflow SDK
//!
//! Client library for the remote workflow service and the orchestrator that
//! drives a draft through create, update and approve.
//!
//! # Example
//!
//! ```no_run
//! use signflow_sdk::{ClientConfig, Orchestrator, WorkflowClient};
//!
//! # async fn run() -> Result<(), signflow_sdk::ServiceError> {
//! let config = ClientConfig::new("https://gateway.example.com", "template-id");
//! let client = WorkflowClient::new(config, "bearer-token")?;
//! let orchestrator = Orchestrator::new(client);
//!
//! let outcome = orchestrator
//!     .create_from_text("2 documents: Offer Letter, NDA. signers: Candidate (aadhaar), HR")
//!     .await;
//! println!("published: {} ({:?})", outcome.success, outcome.workflow_id);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod orchestrator;
mod outcome;
mod service;

pub use client::WorkflowClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ServiceError, WorkflowStep};
pub use orchestrator::Orchestrator;
pub use outcome::{Flow, WorkflowOutcome, STATUS_PUBLISHED};
pub use service::{Draft, WorkflowService};
