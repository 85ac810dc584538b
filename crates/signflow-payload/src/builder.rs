//! Builds the update request body from a [`WorkflowIr`]

use crate::config::PayloadConfig;
use crate::descriptors::{document_descriptors, dynamic_properties, invitee_descriptors};
use crate::error::PayloadError;
use crate::esign;
use crate::model::{
    AssignedDocument, Combination, CombinationSettings, DocumentBlock, InviteeCard,
    InviteeCardBlock, InviteeDetail, InviteeSettings, Invitees, Pack, Stamps, WorkflowData,
    WorkflowPayload,
};
use chrono::{DateTime, Local};
use signflow_domain::{Signer, WorkflowIr};
use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;

const INVITEE_TYPE: &str = "signer";
const DOCUMENT_ROLE: &str = "signer";

/// Turns a [`WorkflowIr`] into a [`WorkflowPayload`]
///
/// Every document, invitee, invitee detail, combination and document
/// assignment gets a fresh v4 UUID on each call.
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    config: PayloadConfig,
}

impl PayloadBuilder {
    /// Create a new PayloadBuilder
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::Config` if the configuration is invalid.
    pub fn new(config: PayloadConfig) -> Result<Self, PayloadError> {
        config.validate().map_err(PayloadError::Config)?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &PayloadConfig {
        &self.config
    }

    /// Build the request body, stamping the pack title with the current time
    pub fn build(&self, ir: &WorkflowIr) -> WorkflowPayload {
        self.build_at(ir, Local::now())
    }

    /// Build the request body with an explicit timestamp for the pack title
    pub fn build_at(&self, ir: &WorkflowIr, now: DateTime<Local>) -> WorkflowPayload {
        let documents: Vec<DocumentBlock> = ir
            .documents
            .iter()
            .map(|name| DocumentBlock {
                id: new_id(),
                document_name: name.clone(),
                sub_documents: Vec::new(),
                stamps: Stamps::default(),
            })
            .collect();

        let emails = self.resolve_emails(&ir.signers);
        let invitee_cards: Vec<InviteeCardBlock> = ir
            .signers
            .iter()
            .zip(emails)
            .map(|(signer, email)| invitee_card(signer, email, &documents))
            .collect();

        let dynamic = dynamic_properties(
            (0..documents.len()).map(document_descriptors).collect(),
            (0..invitee_cards.len()).map(invitee_descriptors).collect(),
        );

        debug!(
            "Built payload: {} documents, {} invitees",
            documents.len(),
            invitee_cards.len()
        );

        WorkflowPayload {
            version_description: self.config.version_description.clone(),
            dynamic_properties: dynamic,
            workflow_data: WorkflowData {
                documents,
                invitees: Invitees { invitee_cards },
                pack: Pack {
                    pack_name: self.pack_name(now),
                },
            },
            rules: Vec::new(),
        }
    }

    /// Pack title: `<prefix> - <timestamp>`
    pub fn pack_name(&self, now: DateTime<Local>) -> String {
        format!(
            "{} - {}",
            self.config.pack_name_prefix,
            now.format(&self.config.pack_timestamp_format)
        )
    }

    /// Final invitee addresses: the signer's own, or a placeholder.
    ///
    /// Placeholders are `placeholder<N>@<domain>` with N the 1-based signer
    /// position; if that collides with an explicit address a `-<k>` suffix is
    /// appended to the local part.
    fn resolve_emails(&self, signers: &[Signer]) -> Vec<String> {
        let explicit: HashSet<String> = signers
            .iter()
            .filter(|s| s.has_email())
            .map(|s| s.email.to_lowercase())
            .collect();

        let mut seen = HashSet::new();
        signers
            .iter()
            .enumerate()
            .map(|(index, signer)| {
                if signer.has_email() {
                    if !seen.insert(signer.email.to_lowercase()) {
                        warn!(
                            "E-mail {} is assigned to more than one signer",
                            signer.email
                        );
                    }
                    return signer.email.clone();
                }
                self.placeholder_email(index + 1, &explicit)
            })
            .collect()
    }

    fn placeholder_email(&self, position: usize, taken: &HashSet<String>) -> String {
        let domain = self.config.placeholder_email_domain.trim();
        let mut candidate = format!("placeholder{position}@{domain}");
        let mut suffix = 1;
        while taken.contains(&candidate.to_lowercase()) {
            candidate = format!("placeholder{position}-{suffix}@{domain}");
            suffix += 1;
        }
        candidate
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn invitee_card(signer: &Signer, email: String, documents: &[DocumentBlock]) -> InviteeCardBlock {
    let assigned_documents = documents
        .iter()
        .map(|doc| AssignedDocument {
            document_reference: format!("/documents/{}", doc.id),
            role: DOCUMENT_ROLE.to_string(),
            id: new_id(),
        })
        .collect();

    InviteeCardBlock {
        id: new_id(),
        invitee_card: InviteeCard {
            id: new_id(),
            invitee_type: INVITEE_TYPE.to_string(),
            invitee_signing_level: signer.signing_level,
            invitee_details: vec![InviteeDetail {
                id: new_id(),
                invitee_label: signer.name.clone(),
                invitee_email: email,
            }],
            invitee_settings: InviteeSettings::default(),
            combinations: vec![Combination {
                id: new_id(),
                assigned_documents,
                combination_settings: CombinationSettings {
                    esign_types: esign::select(signer.signature_method),
                },
            }],
        },
    }
}
