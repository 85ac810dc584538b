//! Wire model of the workflow update request body
//!
//! Field names follow the service's JSON keys.

#![allow(missing_docs)]

use crate::esign::EsignTypes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Complete body of the update-draft request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowPayload {
    /// Description stored with the draft version
    pub version_description: String,

    /// Field-descriptor tree mirroring `workflow_data`
    pub dynamic_properties: Value,

    /// Documents, invitees and pack metadata
    pub workflow_data: WorkflowData,

    /// Conditional-logic rules; always empty
    pub rules: Vec<Value>,
}

/// The `workflowData` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowData {
    /// One block per document
    pub documents: Vec<DocumentBlock>,

    /// Invitee cards
    pub invitees: Invitees,

    /// Pack metadata
    pub pack: Pack,
}

/// One document of the workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentBlock {
    pub id: String,
    pub document_name: String,
    pub sub_documents: Vec<Value>,
    pub stamps: Stamps,
}

/// Stamp settings of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stamps {
    pub merged_document_stamp: bool,
    pub stamp_series: StampSeries,
}

/// Stamp-series settings, disabled by default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StampSeries {
    pub stamp_series_enabled: bool,
    pub series_config: Vec<Map<String, Value>>,
}

impl Default for Stamps {
    fn default() -> Self {
        Self {
            merged_document_stamp: true,
            stamp_series: StampSeries {
                stamp_series_enabled: false,
                series_config: vec![Map::new()],
            },
        }
    }
}

/// The `invitees` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitees {
    pub invitee_cards: Vec<InviteeCardBlock>,
}

/// Outer wrapper of one invitee card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteeCardBlock {
    pub id: String,
    pub invitee_card: InviteeCard,
}

/// One signer of the workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteeCard {
    pub id: String,
    pub invitee_type: String,
    pub invitee_signing_level: u32,
    pub invitee_details: Vec<InviteeDetail>,
    pub invitee_settings: InviteeSettings,
    pub combinations: Vec<Combination>,
}

/// Label and address of an invitee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteeDetail {
    pub id: String,
    pub invitee_label: String,
    pub invitee_email: String,
}

/// Invitee settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteeSettings {
    pub security_options: SecurityOptions,
}

/// Authentication requirements for an invitee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityOptions {
    pub two_fa: bool,
    pub one_fa: bool,
    pub face_capture: bool,
}

impl Default for SecurityOptions {
    fn default() -> Self {
        Self {
            two_fa: false,
            one_fa: true,
            face_capture: true,
        }
    }
}

/// Documents assigned to an invitee together with the signature method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combination {
    pub id: String,
    pub assigned_documents: Vec<AssignedDocument>,
    pub combination_settings: CombinationSettings,
}

/// Reference from a combination to a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedDocument {
    /// `/documents/<document id>`
    pub document_reference: String,
    pub role: String,
    pub id: String,
}

/// Signature-method settings of a combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationSettings {
    pub esign_types: EsignTypes,
}

/// Pack metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pack {
    pub pack_name: String,
}

impl WorkflowPayload {
    /// Number of document blocks
    pub fn document_count(&self) -> usize {
        self.workflow_data.documents.len()
    }

    /// Number of invitee cards
    pub fn invitee_count(&self) -> usize {
        self.workflow_data.invitees.invitee_cards.len()
    }

    /// Total signer-document references across all combinations
    pub fn assignment_count(&self) -> usize {
        self.workflow_data
            .invitees
            .invitee_cards
            .iter()
            .flat_map(|card| &card.invitee_card.combinations)
            .map(|combination| combination.assigned_documents.len())
            .sum()
    }

    /// Convert to a JSON value
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
