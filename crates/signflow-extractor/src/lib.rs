//! Signflow Extractor
//!
//! Turns a free-text description of a document-signing workflow into a
//! [`WorkflowIr`](signflow_domain::WorkflowIr): document names, signers with
//! their signature methods and signing levels, and e-mail bindings.
//!
//! # Overview
//!
//! Extraction is a cascade of named string-matching rules rather than a
//! grammar. Each cascade is an ordered list ([`DocumentRule::CHAIN`],
//! [`SignerRule::CHAIN`], [`BindingRule::CHAIN`]) and the first rule that
//! yields something wins. Extraction never fails: when nothing matches,
//! placeholders are used and the fallback is recorded on the IR.
//!
//! An alternate path, [`AiComposer`], skips the rules entirely and asks an
//! LLM for a finished request body.
//!
//! # Architecture
//!
//! ```text
//! Text → Extractor → WorkflowIr → PayloadBuilder → request body
//! Text → AiComposer → LLM ───────────────────────→ request body
//! ```
//!
//! # Example Usage
//!
//! ```
//! use signflow_extractor::Extractor;
//! use signflow_domain::SignatureMethod;
//!
//! let extractor = Extractor::default();
//! let ir = extractor.extract(
//!     "2 documents: Offer Letter, NDA. signers: Candidate (aadhaar), HR (dsc)",
//! );
//!
//! assert_eq!(ir.documents, vec!["Offer Letter", "Nda"]);
//! assert_eq!(ir.signers[0].signature_method, SignatureMethod::Aadhaar);
//! assert_eq!(ir.signers[1].name, "Hr");
//! ```

#![warn(missing_docs)]

mod composer;
mod config;
mod documents;
mod emails;
mod error;
mod extractor;
mod parser;
mod prompt;
mod signers;
mod text;

#[cfg(test)]
mod tests;

pub use composer::AiComposer;
pub use config::{ComposerConfig, ExtractorConfig};
pub use documents::DocumentRule;
pub use emails::{collect_bindings, find_emails, BindingRule};
pub use error::{ComposeError, ExtractorError};
pub use extractor::Extractor;
pub use parser::{parse_composed_payload, strip_code_fences};
pub use prompt::{PromptBuilder, USER_INPUT_MARKER};
pub use signers::{clean_signer_name, parse_signer_clause, SignerRule};
