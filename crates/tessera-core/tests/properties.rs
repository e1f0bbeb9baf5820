//! Property-based tests for the identifier and barcode logic.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::collections::HashSet;

use proptest::prelude::*;

use tessera_core::abbreviation::assign_abbreviation;
use tessera_core::barcode::{allocate_barcode, allocate_unique_barcode, ExistenceCheck};
use tessera_core::checksum::{compute_check_digit, is_valid_ean13};
use tessera_core::identifier::{batch_item_code, parse_sizes, sanitize};
use tessera_core::BARCODE_PREFIX;

/// Strategy for the characters people type into article / color / size fields.
fn token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 /-]{0,20}"
}

proptest! {
    #[test]
    fn prop_check_digit_completes_valid_ean13(data in "[0-9]{12}") {
        let digit = compute_check_digit(&data).unwrap();
        prop_assert!(digit <= 9);

        let full = format!("{}{}", data, digit);
        prop_assert!(is_valid_ean13(&full));
    }

    #[test]
    fn prop_wrong_check_digit_is_rejected(data in "[0-9]{12}", offset in 1u8..10) {
        let digit = compute_check_digit(&data).unwrap();
        let wrong = (digit + offset) % 10;
        let full = format!("{}{}", data, wrong);
        prop_assert!(!is_valid_ean13(&full));
    }

    #[test]
    fn prop_allocated_barcodes_are_valid(sequence in 0u64..=999_999_999) {
        let barcode = allocate_barcode(sequence).unwrap();
        prop_assert_eq!(barcode.digits().len(), 13);
        prop_assert!(barcode.digits().starts_with(BARCODE_PREFIX));
        prop_assert!(is_valid_ean13(barcode.digits()));
    }

    #[test]
    fn prop_unique_barcode_avoids_taken_set(
        count in 0u64..1_000,
        taken in prop::collection::hash_set(1u64..1_100, 0..30),
    ) {
        let taken: HashSet<String> = taken
            .into_iter()
            .map(|seq| allocate_barcode(seq).unwrap().digits().to_string())
            .collect();

        // 31 tries always outlast 30 taken candidates
        let barcode = allocate_unique_barcode(
            || count,
            |candidate| ExistenceCheck::from(taken.contains(candidate.digits())),
            31,
        )
        .unwrap();
        prop_assert!(!taken.contains(barcode.digits()));
    }

    #[test]
    fn prop_sanitize_is_idempotent(text in token()) {
        let once = sanitize(&text);
        prop_assert_eq!(sanitize(&once), once.clone());
        prop_assert!(!once.contains(' '));
        prop_assert!(!once.contains('/'));
    }

    #[test]
    fn prop_batch_codes_are_sanitized(base in token(), color in token(), size in "[A-Z0-9]{1,4}") {
        let code = batch_item_code(&base, &color, &size);
        prop_assert_eq!(sanitize(&code), code);
    }

    #[test]
    fn prop_parsed_sizes_are_trimmed(sizes in prop::collection::vec("[A-Z0-9]{1,3}", 1..8)) {
        let joined = sizes.join(" ,  ");
        prop_assert_eq!(parse_sizes(&joined).unwrap(), sizes);
    }

    #[test]
    fn prop_abbreviations_stay_distinct(values in prop::collection::vec("[a-zA-Z]{1,8}", 1..40)) {
        let mut taken: Vec<String> = Vec::new();
        for value in &values {
            let abbr = assign_abbreviation(taken.iter().map(String::as_str), value);
            prop_assert!(!taken.contains(&abbr));
            taken.push(abbr);
        }

        let unique: HashSet<&String> = taken.iter().collect();
        prop_assert_eq!(unique.len(), taken.len());
    }
}
