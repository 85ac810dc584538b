//! End-to-end extraction scenarios

use crate::{Extractor, ExtractorConfig};
use signflow_domain::{
    DocumentSource, ExtractionFallback, SignatureMethod, SignerRef, SignerSource,
};

fn extract(text: &str) -> signflow_domain::WorkflowIr {
    Extractor::default().extract(text)
}

fn methods(ir: &signflow_domain::WorkflowIr) -> Vec<SignatureMethod> {
    ir.signers.iter().map(|s| s.signature_method).collect()
}

#[test]
fn test_documents_colon_list() {
    let ir = extract("Create a workflow. documents: x, y, z");
    assert_eq!(ir.documents, vec!["X", "Y", "Z"]);
    assert_eq!(ir.document_source, DocumentSource::DocumentsColon);
}

#[test]
fn test_documents_bare_word_letters() {
    let ir = extract("documents A and B");
    assert_eq!(ir.documents, vec!["A", "B"]);
}

#[test]
fn test_documents_bare_word_with_lead_in_phrase() {
    for text in [
        "Send documents for the NDA and Lease.",
        "Create workflow with 2 documents to sign: NDA and Lease",
    ] {
        let ir = extract(text);
        assert_eq!(ir.documents, vec!["Nda", "Lease"], "{text}");
        assert_eq!(ir.document_source, DocumentSource::DocumentsWord);
        assert!(!ir.fallbacks.contains(&ExtractionFallback::PlaceholderDocument));
    }
}

#[test]
fn test_no_document_cues() {
    let ir = extract("please send this out today");
    assert_eq!(ir.documents, vec!["Document 1"]);
    assert_eq!(ir.document_source, DocumentSource::Placeholder);
    assert!(ir.fallbacks.contains(&ExtractionFallback::PlaceholderDocument));
}

#[test]
fn test_empty_input_is_all_defaults() {
    let ir = extract("   ");
    assert_eq!(ir.documents, vec!["Document 1"]);
    let names: Vec<&str> = ir.signers.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Signer 1", "Signer 2"]);
    assert!(ir.signers.iter().all(|s| !s.has_email()));
    assert_eq!(ir.default_method, SignatureMethod::Standard);
    assert!(ir.is_degraded());
}

#[test]
fn test_signer_clause_methods_and_levels() {
    let ir = extract("signers: Bank Signatory (aadhaar eSign), Customer (DSC)");
    assert_eq!(ir.signer_source, SignerSource::SignerClause);
    assert_eq!(ir.signers.len(), 2);
    assert_eq!(methods(&ir), vec![SignatureMethod::Aadhaar, SignatureMethod::Dsc]);
    assert_eq!(ir.signers[0].signing_level, 1);
    assert_eq!(ir.signers[1].signing_level, 2);
    assert_eq!(ir.signers[0].name, "Bank Signatory");
}

#[test]
fn test_first_signer_email_binds_only_position_zero() {
    let ir = extract(
        "signers: Alice (dsc), Bob (aadhaar), Carol. First signer email: a@b.com",
    );
    assert_eq!(ir.signers[0].email, "a@b.com");
    assert!(ir.signers[1..].iter().all(|s| s.email.is_empty()));
}

#[test]
fn test_simple_path_gets_first_email() {
    let ir = extract("Ronit and Sid need to sign. Contact ronit@corp.com");
    assert_eq!(ir.signer_source, SignerSource::KnownNames);
    assert_eq!(ir.signers[0].email, "ronit@corp.com");
    assert_eq!(ir.signers[1].email, "");
}

#[test]
fn test_clause_path_never_guesses_email() {
    let ir = extract("signers: Customer (aadhaar), Manager (dsc). Contact ops@corp.com");
    assert_eq!(ir.emails, vec!["ops@corp.com"]);
    assert!(ir.signers.iter().all(|s| s.email.is_empty()));
}

#[test]
fn test_placeholder_signers_take_first_email() {
    let ir = extract("documents: nda. send to legal@corp.com");
    assert_eq!(ir.signer_source, SignerSource::Placeholder);
    assert_eq!(ir.signers[0].email, "legal@corp.com");
    assert_eq!(ir.signers[1].email, "");
}

#[test]
fn test_positional_binding_blocks_first_email_fallback() {
    let ir = extract("Ronit and Sid sign. cc audit@corp.com. signer 1 email: r@corp.com");
    assert_eq!(ir.signers[0].email, "r@corp.com");
    assert_eq!(ir.signers[1].email, "");
}

#[test]
fn test_binding_for_other_position_keeps_first_email_fallback() {
    let ir = extract("Ronit and Sid sign. cc audit@corp.com. second signer email: sid@corp.com");
    assert_eq!(ir.signers[0].email, "audit@corp.com");
    assert_eq!(ir.signers[1].email, "sid@corp.com");
}

#[test]
fn test_named_binding_on_simple_path() {
    let ir = extract("Ronit and Sid will sign. sid email: s@corp.com");
    assert_eq!(
        ir.email_assignments.get(&SignerRef::name("sid")),
        Some("s@corp.com")
    );
    assert_eq!(ir.signers[1].email, "s@corp.com");
    // no position-0 binding, so the first literal still goes to the first signer
    assert_eq!(ir.signers[0].email, "s@corp.com");
}

#[test]
fn test_named_binding_ignored_on_clause_path() {
    let ir = extract("signers: Ronit, Sid. sid email: s@corp.com");
    assert!(ir.email_assignments.is_empty());
    assert!(ir.signers.iter().all(|s| s.email.is_empty()));
}

#[test]
fn test_default_method_applies_to_simple_signers() {
    let ir = extract("Customer and manager sign everything via Aadhaar");
    assert_eq!(ir.default_method, SignatureMethod::Aadhaar);
    assert_eq!(methods(&ir), vec![SignatureMethod::Aadhaar; 2]);
}

#[test]
fn test_default_method_ignored_by_clause_path() {
    let ir = extract("Use DSC. signers: Customer, Manager (multiple)");
    assert_eq!(ir.default_method, SignatureMethod::Dsc);
    assert_eq!(
        methods(&ir),
        vec![SignatureMethod::Standard, SignatureMethod::Multiple]
    );
}

#[test]
fn test_level_override_in_annotation() {
    let ir = extract("signers: Customer (aadhaar, level 1), Manager (dsc, order 1)");
    let levels: Vec<u32> = ir.signers.iter().map(|s| s.signing_level).collect();
    assert_eq!(levels, vec![1, 1]);
}

#[test]
fn test_end_to_end_letters() {
    let ir = extract("Create workflow with 2 documents A and B");
    assert_eq!(ir.documents, vec!["A", "B"]);
    assert_eq!(ir.signers.len(), 2);
    assert_eq!(ir.signer_source, SignerSource::Placeholder);
    assert_eq!(ir.combination_count(), 4);
}

#[test]
fn test_end_to_end_bank_loan() {
    let ir = extract(
        "3 documents: Sanction Letter, Loan Agreement, Bank Guarantee. \
         4 signers: Bank Signatory (aadhaar eSign), Customer (DSC), \
         Subordinate (multiple sign types), Bank Signatory (DSC). \
         First signer email: x@y.com",
    );
    assert_eq!(
        ir.documents,
        vec!["Sanction Letter", "Loan Agreement", "Bank Guarantee"]
    );
    assert_eq!(
        methods(&ir),
        vec![
            SignatureMethod::Aadhaar,
            SignatureMethod::Dsc,
            SignatureMethod::Multiple,
            SignatureMethod::Dsc,
        ]
    );
    assert_eq!(ir.signers[0].email, "x@y.com");
    assert!(ir.signers[1..].iter().all(|s| s.email.is_empty()));
    assert!(!ir.is_degraded());
}

#[test]
fn test_custom_placeholders() {
    let config = ExtractorConfig {
        placeholder_document: "Agreement".to_string(),
        placeholder_signers: vec!["Party".to_string()],
        ..ExtractorConfig::default()
    };
    let ir = Extractor::new(config).unwrap().extract("nothing here");
    assert_eq!(ir.documents, vec!["Agreement"]);
    assert_eq!(ir.signers.len(), 1);
    assert_eq!(ir.signers[0].name, "Party");
}
