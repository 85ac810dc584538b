//! Field descriptors for the service's form renderer
//!
//! Every editable field in `workflowData` has a `<field>#p` descriptor in the
//! `dynamicProperties` tree, at the same nesting. `attributeRef` points back
//! into the data with `/`-separated paths such as `documents/0/documentName`.
//! The set of descriptors is fixed; only the indices vary.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Widget kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    /// Push button
    Button,
    /// File picker
    FileUpload,
    /// Grouping box
    Container,
    /// Repeated grouping box
    ContainerList,
    /// Sub-document list editor
    SubDocumentsList,
    /// Single-line text
    TextInput,
    /// Radio buttons
    RadioGroup,
    /// On/off switch
    Toggle,
    /// Select box
    Dropdown,
    /// Tab strip, one tab per document
    TabList,
    /// Invitee list editor
    InviteeList,
    /// One invitee card
    InviteeCard,
    /// Modal dialog
    Modal,
}

/// Visibility, editability and mandatory flags for one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Path of the described value inside `workflowData`, empty for pure UI elements
    #[serde(rename = "attributeRef")]
    pub attribute_ref: String,

    /// Visible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v: Option<bool>,

    /// Editable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<bool>,

    /// Mandatory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m: Option<bool>,

    /// Widget kind
    #[serde(rename = "type")]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Descriptor with no flags set
    pub fn new(kind: FieldKind, attribute_ref: impl Into<String>) -> Self {
        Self {
            attribute_ref: attribute_ref.into(),
            v: None,
            e: None,
            m: None,
            kind,
        }
    }

    /// Visible, editable, optional: the usual form field
    pub fn form_field(kind: FieldKind, attribute_ref: impl Into<String>) -> Self {
        Self::new(kind, attribute_ref)
            .visible(true)
            .editable(true)
            .mandatory(false)
    }

    /// Set the visible flag
    pub fn visible(mut self, v: bool) -> Self {
        self.v = Some(v);
        self
    }

    /// Set the editable flag
    pub fn editable(mut self, e: bool) -> Self {
        self.e = Some(e);
        self
    }

    /// Set the mandatory flag
    pub fn mandatory(mut self, m: bool) -> Self {
        self.m = Some(m);
        self
    }
}

/// Descriptor subtree for the document at `index`
pub fn document_descriptors(index: usize) -> Value {
    let doc = format!("documents/{index}");
    let series = format!("{doc}/stamps/stampSeries");
    json!({
        "deleteDocument#p": FieldDescriptor::new(FieldKind::Button, "").visible(false).editable(false),
        "uploadDocumentEnabled#p": FieldDescriptor::form_field(FieldKind::FileUpload, ""),
        "selectTemplateSection#p": FieldDescriptor::new(FieldKind::Container, "").visible(true),
        "selectTemplateSection": {
            "selectTemplateEnabled#p": FieldDescriptor::new(FieldKind::Button, "").visible(true).editable(true),
        },
        "subDocuments#p": FieldDescriptor::form_field(FieldKind::SubDocumentsList, format!("{doc}/subDocuments")),
        "documentName#p": FieldDescriptor::form_field(FieldKind::TextInput, format!("{doc}/documentName")),
        "stampsSection#p": FieldDescriptor::new(FieldKind::Container, "").visible(true),
        "stampsSection": {
            "mergedDocumentStamp#p": FieldDescriptor::new(FieldKind::RadioGroup, format!("{doc}/stamps/mergedDocumentStamp")).visible(true).editable(true),
            "stampSeries#p": FieldDescriptor::new(FieldKind::Container, series.clone()).visible(true),
            "stampSeries": {
                "stampSeriesEnabled#p": FieldDescriptor::new(FieldKind::Toggle, format!("{series}/stampSeriesEnabled")).visible(true).editable(true),
                "seriesConfig#p": FieldDescriptor::new(FieldKind::ContainerList, format!("{series}/seriesConfig")).visible(true),
                "seriesConfig": [{
                    "stampSeriesId#p": FieldDescriptor::form_field(FieldKind::Dropdown, format!("{series}/seriesConfig/0/stampSeriesId")),
                }],
            },
        },
    })
}

/// Descriptor subtree for the invitee card at `index`
pub fn invitee_descriptors(index: usize) -> Value {
    let card = format!("invitees/inviteeCards/{index}/inviteeCard");
    json!({
        "inviteeCard#p": FieldDescriptor::form_field(FieldKind::InviteeCard, card.clone()),
        "inviteeCard": {
            "inviteeType#p": FieldDescriptor::form_field(FieldKind::Dropdown, format!("{card}/inviteeType")),
            "inviteeDetails#p": FieldDescriptor::form_field(FieldKind::ContainerList, format!("{card}/inviteeDetails")),
            "inviteeDetails": [{
                "inviteeLabel#p": FieldDescriptor::form_field(FieldKind::TextInput, format!("{card}/inviteeDetails/0/inviteeLabel")).editable(false),
                "inviteeEmail#p": FieldDescriptor::form_field(FieldKind::TextInput, format!("{card}/inviteeDetails/0/inviteeEmail")),
            }],
            "combinations#p": FieldDescriptor::form_field(FieldKind::ContainerList, format!("{card}/combinations")),
            "combinations": [{
                "combinationSettings#p": FieldDescriptor::form_field(FieldKind::Container, format!("{card}/combinations/0/combinationSettings")),
                "assignedDocuments#p": FieldDescriptor::form_field(FieldKind::Modal, format!("{card}/combinations/0/assignedDocuments")),
            }],
            "inviteeSettings#p": FieldDescriptor::form_field(FieldKind::Container, format!("{card}/inviteeSettings")),
        },
    })
}

/// Root of the `dynamicProperties` tree
pub fn dynamic_properties(documents: Vec<Value>, invitee_cards: Vec<Value>) -> Value {
    json!({
        "documents#p": FieldDescriptor::new(FieldKind::TabList, "documents").editable(false),
        "documents": documents,
        "invitees#p": FieldDescriptor::form_field(FieldKind::Container, "invitees"),
        "invitees": {
            "inviteeCards#p": FieldDescriptor::form_field(FieldKind::InviteeList, "invitees/inviteeCards"),
            "inviteeCards": invitee_cards,
        },
    })
}

/// Collect every `attributeRef` in a descriptor tree, skipping empty ones
pub fn attribute_refs(tree: &Value) -> Vec<String> {
    let mut refs = Vec::new();
    collect_refs(tree, &mut refs);
    refs
}

fn collect_refs(node: &Value, refs: &mut Vec<String>) {
    match node {
        Value::Object(map) => {
            if let Some(Value::String(r)) = map.get("attributeRef") {
                if !r.is_empty() {
                    refs.push(r.clone());
                }
            }
            map.values().for_each(|v| collect_refs(v, refs));
        }
        Value::Array(items) => items.iter().for_each(|v| collect_refs(v, refs)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_flags_serialize_only_when_set() {
        let value = serde_json::to_value(FieldDescriptor::new(FieldKind::TabList, "documents").editable(false))
            .unwrap();
        assert_eq!(
            value,
            json!({"attributeRef": "documents", "e": false, "type": "TAB_LIST"})
        );
    }

    #[test]
    fn test_document_paths_use_index() {
        let tree = document_descriptors(2);
        assert_eq!(
            tree["documentName#p"]["attributeRef"],
            "documents/2/documentName"
        );
        assert_eq!(
            tree["stampsSection"]["stampSeries"]["seriesConfig"][0]["stampSeriesId#p"]["type"],
            "DROPDOWN"
        );
        assert!(attribute_refs(&tree)
            .iter()
            .all(|r| r.starts_with("documents/2/")));
    }

    #[test]
    fn test_invitee_label_is_read_only() {
        let tree = invitee_descriptors(1);
        let label = &tree["inviteeCard"]["inviteeDetails"][0]["inviteeLabel#p"];
        assert_eq!(label["e"], false);
        assert_eq!(label["v"], true);
        assert_eq!(
            label["attributeRef"],
            "invitees/inviteeCards/1/inviteeCard/inviteeDetails/0/inviteeLabel"
        );
        assert!(attribute_refs(&tree)
            .iter()
            .all(|r| r.starts_with("invitees/inviteeCards/1/")));
    }

    #[test]
    fn test_root_tree() {
        let root = dynamic_properties(vec![document_descriptors(0)], vec![]);
        assert_eq!(root["documents#p"]["type"], "TAB_LIST");
        assert_eq!(root["invitees"]["inviteeCards#p"]["type"], "INVITEE_LIST");
        assert_eq!(root["documents"].as_array().map(Vec::len), Some(1));
    }
}
