//! Per-element validation of lists.

use verdict::{checks, Check, FieldPath, Proof, Validate};

#[derive(Debug, Clone, PartialEq)]
enum Failure {
    NotNumeric,
    Empty,
    TooFewItems,
    InvalidEmail,
}

#[test]
fn test_each_element_is_checked() {
    let acc: Check<Failure, Vec<u16>> = Validate::field("ports", vec!["80", "http", "443", ""])
        .refute_each_with(checks::parse(Failure::NotNumeric));

    let failures = acc.into_failures();
    assert_eq!(
        failures.at_path(&FieldPath::field("ports").push_index(1)),
        Some(&[Failure::NotNumeric][..])
    );
    assert_eq!(
        failures.at_path(&FieldPath::field("ports").push_index(3)),
        Some(&[Failure::NotNumeric][..])
    );
    assert_eq!(failures.len(), 2);
}

#[test]
fn test_all_elements_valid_transforms_list() {
    let proof = Validate::field("ports", vec!["80", "443"])
        .refute_each_with(checks::parse::<_, u16, _>(Failure::NotNumeric))
        .qed()
        .to_proof();
    assert_eq!(proof, Proof::Valid(vec![80, 443]));
}

#[test]
fn test_list_level_and_element_level_failures() {
    let acc: Check<Failure, Vec<String>> = Validate::field("tags", vec![String::new()])
        .dispute_with(checks::min_items(2, Failure::TooFewItems))
        .dispute_each_with(checks::not_empty(Failure::Empty));

    let failures = acc.into_failures();
    assert_eq!(
        failures.at_path(&FieldPath::field("tags")),
        Some(&[Failure::TooFewItems][..])
    );
    assert_eq!(
        failures.at_path(&FieldPath::field("tags").push_index(0)),
        Some(&[Failure::Empty][..])
    );
}

fn contact(email: String) -> Proof<Failure, String> {
    Validate::field("email", email)
        .dispute_with(checks::email(Failure::InvalidEmail))
        .qed()
        .to_proof()
}

#[test]
fn test_nested_element_proofs_are_prefixed_by_index() {
    let emails = vec![
        "ada@example.com".to_string(),
        "nope".to_string(),
        "grace@example.com".to_string(),
        "also nope".to_string(),
    ];

    let acc = Validate::field("contacts", emails).refute_each_with_proof(contact);
    let failures = acc.into_failures();

    let paths: Vec<_> = failures.fields().paths().map(ToString::to_string).collect();
    assert_eq!(paths, vec!["contacts[1].email", "contacts[3].email"]);
}

#[test]
fn test_parallel_element_proofs_match_sequential() {
    let emails: Vec<String> = (0..200)
        .map(|i| {
            if i % 9 == 0 {
                format!("user{}", i)
            } else {
                format!("user{}@example.com", i)
            }
        })
        .collect();

    let sequential = Validate::field("contacts", emails.clone()).refute_each_with_proof(contact);
    let parallel = Validate::field("contacts", emails).refute_each_with_proof_par(contact);

    let sequential = sequential.into_failures();
    let parallel = parallel.into_failures();
    let order = |failures: &verdict::Failures<Failure>| -> Vec<String> {
        failures.fields().paths().map(ToString::to_string).collect()
    };
    assert_eq!(order(&sequential), order(&parallel));
    assert_eq!(sequential, parallel);
}

#[test]
fn test_element_failures_in_global_list() {
    let proof: Proof<Failure, Vec<u8>> = Validate::value(vec!["1", "x"])
        .refute_each_with(checks::parse(Failure::NotNumeric))
        .qed()
        .to_proof();

    let failures = proof.failures().unwrap();
    assert!(failures.global().is_empty());
    assert_eq!(
        failures.at_path(&FieldPath::index(1)),
        Some(&[Failure::NotNumeric][..])
    );
}
