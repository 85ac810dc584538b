//! Extractor → PayloadBuilder scenarios

use signflow_extractor::Extractor;
use signflow_payload::{descriptors, PayloadBuilder};

fn esign_keys(card: &serde_json::Value) -> Vec<String> {
    card["inviteeCard"]["combinations"][0]["combinationSettings"]["esignTypes"]
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default()
}

#[test]
fn test_letters_scenario() {
    let ir = Extractor::default().extract("Create workflow with 2 documents A and B");
    let payload = PayloadBuilder::default().build(&ir);

    assert_eq!(payload.document_count(), 2);
    assert_eq!(payload.invitee_count(), 2);
    assert_eq!(payload.assignment_count(), 4);

    let names: Vec<&str> = payload
        .workflow_data
        .documents
        .iter()
        .map(|d| d.document_name.as_str())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_bank_loan_scenario() {
    let ir = Extractor::default().extract(
        "3 documents: Sanction Letter, Loan Agreement, Bank Guarantee. \
         4 signers: Bank Signatory (aadhaar eSign), Customer (DSC), \
         Subordinate (multiple sign types), Bank Signatory (DSC). \
         First signer email: x@y.com",
    );
    let value = PayloadBuilder::default().build(&ir).to_value().unwrap();
    let cards = value["workflowData"]["invitees"]["inviteeCards"]
        .as_array()
        .unwrap();
    assert_eq!(cards.len(), 4);
    assert_eq!(value["workflowData"]["documents"].as_array().unwrap().len(), 3);

    assert_eq!(esign_keys(&cards[0]), vec!["aadharEsign"]);
    assert_eq!(esign_keys(&cards[1]), vec!["dscToken"]);
    assert_eq!(esign_keys(&cards[2]).len(), 4);
    assert_eq!(esign_keys(&cards[3]), vec!["dscToken"]);

    let emails: Vec<&str> = cards
        .iter()
        .map(|c| c["inviteeCard"]["inviteeDetails"][0]["inviteeEmail"].as_str().unwrap())
        .collect();
    assert_eq!(emails[0], "x@y.com");
    assert!(emails[1..].iter().all(|e| e.starts_with("placeholder")));
}

#[test]
fn test_descriptor_tree_mirrors_data() {
    let ir = Extractor::default().extract("documents: nda, offer letter. Ronit and Sid sign");
    let payload = PayloadBuilder::default().build(&ir);

    let refs = descriptors::attribute_refs(&payload.dynamic_properties);
    for index in 0..payload.document_count() {
        assert!(refs.contains(&format!("documents/{index}/documentName")));
    }
    for index in 0..payload.invitee_count() {
        assert!(refs.contains(&format!(
            "invitees/inviteeCards/{index}/inviteeCard/inviteeDetails/0/inviteeEmail"
        )));
    }
}

#[test]
fn test_each_build_has_fresh_ids() {
    let ir = Extractor::default().extract("documents: nda");
    let builder = PayloadBuilder::default();
    let first = builder.build(&ir);
    let second = builder.build(&ir);
    assert_ne!(
        first.workflow_data.documents[0].id,
        second.workflow_data.documents[0].id
    );
}
