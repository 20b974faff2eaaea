//! Property tests: classification is total and its output is clean for
//! arbitrary input.

use menuboard::price::{classify, PriceDescriptor, PriceShape};
use proptest::prelude::*;

/// Strings biased towards the delimiters and keywords the rules look at.
fn price_like() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        Just("Half".to_string()),
        Just("Full".to_string()),
        Just("half".to_string()),
        Just("FULL".to_string()),
        Just(":".to_string()),
        Just(",".to_string()),
        Just("|".to_string()),
        Just(" ".to_string()),
        Just("\t".to_string()),
        Just("₹".to_string()),
        "[A-Za-z0-9]{1,4}",
    ];
    prop::collection::vec(token, 0..16).prop_map(|tokens| tokens.concat())
}

fn option_lists(descriptor: &PriceDescriptor) -> Vec<Vec<String>> {
    match descriptor {
        PriceDescriptor::Complex { sections } | PriceDescriptor::Grouped { sections } => {
            sections.iter().map(|(_, options)| options.to_vec()).collect()
        }
        PriceDescriptor::Simple { options } => vec![options.clone()],
        PriceDescriptor::HalfFull { .. } | PriceDescriptor::Single { .. } => Vec::new(),
    }
}

fn check_invariants(raw: &str) -> Result<(), TestCaseError> {
    let descriptor = classify(raw);
    prop_assert!(PriceShape::ALL.contains(&descriptor.shape()));

    for leaf in descriptor.leaves() {
        prop_assert_eq!(leaf, leaf.trim(), "untrimmed leaf in {:?}", descriptor);
    }
    for list in option_lists(&descriptor) {
        prop_assert!(
            list.iter().all(|option| !option.is_empty()),
            "empty option in {:?}",
            descriptor
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 2_000, .. ProptestConfig::default() })]

    #[test]
    fn prop_total_and_clean_on_price_like_text(raw in price_like()) {
        check_invariants(&raw)?;
    }

    #[test]
    fn prop_total_and_clean_on_arbitrary_text(raw in any::<String>()) {
        check_invariants(&raw)?;
    }

    #[test]
    fn prop_surrounding_whitespace_is_ignored(raw in price_like()) {
        let padded = format!(" \t{raw}\n ");
        prop_assert_eq!(classify(&raw), classify(&padded));
    }

    #[test]
    fn prop_grouped_labels_are_positional(raw in price_like()) {
        if let PriceDescriptor::Grouped { sections } = classify(&raw) {
            let expected: Vec<String> = (1..=raw.trim().split(',').count())
                .map(|i| format!("Group {i}"))
                .collect();
            let labels: Vec<String> = sections.labels().map(String::from).collect();
            prop_assert_eq!(labels, expected);
        }
    }

    #[test]
    fn prop_complex_labels_are_unique(raw in price_like()) {
        if let PriceDescriptor::Complex { sections } = classify(&raw) {
            let mut labels: Vec<&str> = sections.labels().collect();
            let before = labels.len();
            labels.sort_unstable();
            labels.dedup();
            prop_assert_eq!(labels.len(), before);
        }
    }
}
