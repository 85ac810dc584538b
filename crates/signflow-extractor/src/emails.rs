//! E-mail literal scanning and signer binding phrases

use regex::Regex;
use signflow_domain::{EmailAssignments, SignerRef};
use std::sync::LazyLock;

const EMAIL: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

static EMAIL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b{EMAIL}\b")).expect("email pattern is valid")
});

static FIRST_SIGNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"first\s+signer\s+email[:\s]+({EMAIL})"))
        .expect("first signer pattern is valid")
});

static SECOND_SIGNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"second\s+signer\s+email[:\s]+({EMAIL})"))
        .expect("second signer pattern is valid")
});

static NUMBERED_SIGNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"signer\s+(\d+)\s+email[:\s]+({EMAIL})"))
        .expect("numbered signer pattern is valid")
});

static NAMED_SIGNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b([a-z][a-z'-]*)\s+email[:\s]+({EMAIL})"))
        .expect("named signer pattern is valid")
});

/// Words that can precede `email` without naming a signer
const NOT_A_NAME: [&str; 8] = ["signer", "first", "second", "the", "an", "a", "with", "and"];

/// Every e-mail literal in `text`, in order of appearance.
pub fn find_emails(text: &str) -> Vec<String> {
    EMAIL_LITERAL
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A contextual phrase that binds an address to a signer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingRule {
    /// `first signer email: <addr>` binds position 0
    FirstSigner,
    /// `second signer email: <addr>` binds position 1
    SecondSigner,
    /// `signer <N> email: <addr>` binds position N-1
    NumberedSigner,
    /// `<name> email: <addr>` binds by lower-cased name
    NamedSigner,
}

impl BindingRule {
    /// Application order; later bindings for the same key win
    pub const CHAIN: [BindingRule; 4] = [
        BindingRule::FirstSigner,
        BindingRule::SecondSigner,
        BindingRule::NumberedSigner,
        BindingRule::NamedSigner,
    ];

    /// Apply this rule to lower-cased text
    pub fn apply(&self, lower: &str, assignments: &mut EmailAssignments) {
        match self {
            BindingRule::FirstSigner => {
                for caps in FIRST_SIGNER.captures_iter(lower) {
                    assignments.bind(SignerRef::Position(0), &caps[1]);
                }
            }
            BindingRule::SecondSigner => {
                for caps in SECOND_SIGNER.captures_iter(lower) {
                    assignments.bind(SignerRef::Position(1), &caps[1]);
                }
            }
            BindingRule::NumberedSigner => {
                for caps in NUMBERED_SIGNER.captures_iter(lower) {
                    let position = caps[1].parse::<usize>().ok().filter(|n| *n > 0);
                    if let Some(n) = position {
                        assignments.bind(SignerRef::Position(n - 1), &caps[2]);
                    }
                }
            }
            BindingRule::NamedSigner => {
                for caps in NAMED_SIGNER.captures_iter(lower) {
                    let name = &caps[1];
                    if !NOT_A_NAME.contains(&name) {
                        assignments.bind(SignerRef::name(name), &caps[2]);
                    }
                }
            }
        }
    }
}

/// Collect binding phrases from lower-cased text.
///
/// `<name> email:` phrases are honored only when `include_named` is set,
/// which the extractor does outside the signer-clause path.
pub fn collect_bindings(lower: &str, include_named: bool) -> EmailAssignments {
    let mut assignments = EmailAssignments::new();
    for rule in BindingRule::CHAIN {
        if rule == BindingRule::NamedSigner && !include_named {
            continue;
        }
        rule.apply(lower, &mut assignments);
    }
    assignments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        for pattern in [
            &EMAIL_LITERAL,
            &FIRST_SIGNER,
            &SECOND_SIGNER,
            &NUMBERED_SIGNER,
            &NAMED_SIGNER,
        ] {
            assert!(!pattern.as_str().is_empty());
        }
    }

    #[test]
    fn test_find_emails_in_order() {
        let emails = find_emails("Mail Alice.B@Example.com then bob+x@corp.co.in.");
        assert_eq!(emails, vec!["Alice.B@Example.com", "bob+x@corp.co.in"]);
    }

    #[test]
    fn test_positional_bindings() {
        let assignments = collect_bindings(
            "first signer email: a@b.com. second signer email b@c.com. signer 4 email: d@e.com",
            false,
        );
        assert_eq!(assignments.get(&SignerRef::Position(0)), Some("a@b.com"));
        assert_eq!(assignments.get(&SignerRef::Position(1)), Some("b@c.com"));
        assert_eq!(assignments.get(&SignerRef::Position(3)), Some("d@e.com"));
        assert_eq!(assignments.len(), 3);
    }

    #[test]
    fn test_numbered_overrides_first() {
        let assignments =
            collect_bindings("first signer email: a@b.com and signer 1 email: z@b.com", false);
        assert_eq!(assignments.get(&SignerRef::Position(0)), Some("z@b.com"));
    }

    #[test]
    fn test_signer_zero_ignored() {
        let assignments = collect_bindings("signer 0 email: a@b.com", false);
        assert!(assignments.is_empty());
    }

    #[test]
    fn test_named_binding_only_when_enabled() {
        let text = "ronit email: r@x.com";
        assert!(collect_bindings(text, false).is_empty());

        let assignments = collect_bindings(text, true);
        assert_eq!(assignments.get(&SignerRef::name("Ronit")), Some("r@x.com"));
    }

    #[test]
    fn test_named_binding_skips_positional_words() {
        let assignments = collect_bindings("first signer email: a@b.com", true);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments.get(&SignerRef::Position(0)), Some("a@b.com"));
    }
}
