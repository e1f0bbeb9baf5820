//! # Abbreviation Assigner
//!
//! Short, collision-free codes for attribute values.
//!
//! ```text
//! existing: {}              "Red"     → RED
//! existing: {RED}           "Reddish" → RED1
//! existing: {RED, RED1}     "Redwood" → RED2
//! existing: {RED, ...}      "XL"      → XL
//! ```
//!
//! Suffixes always extend the original three-letter candidate, never the
//! previously tried one (RED1, RED2, not RED12).

use std::collections::HashSet;

/// Number of leading characters used for an abbreviation.
pub const ABBREVIATION_LENGTH: usize = 3;

/// Returns the unsuffixed candidate: the first three characters, uppercased.
pub fn base_abbreviation(value: &str) -> String {
    value
        .chars()
        .take(ABBREVIATION_LENGTH)
        .collect::<String>()
        .to_uppercase()
}

/// Picks the first abbreviation for `value` that is not in `existing`.
///
/// Deterministic: the same existing set and value always give the same
/// result. The caller appends the returned abbreviation to the attribute's
/// value set.
///
/// ## Example
/// ```rust
/// use tessera_core::abbreviation::assign_abbreviation;
///
/// assert_eq!(assign_abbreviation(["BLU"], "Red"), "RED");
/// assert_eq!(assign_abbreviation(["RED"], "Reddish"), "RED1");
/// assert_eq!(assign_abbreviation(["RED", "RED1"], "Redwood"), "RED2");
/// ```
pub fn assign_abbreviation<'a, I>(existing: I, value: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    let candidate = base_abbreviation(value);

    if !taken.contains(candidate.as_str()) {
        return candidate;
    }

    let mut suffix = 1u32;
    loop {
        let abbr = format!("{}{}", candidate, suffix);
        if !taken.contains(abbr.as_str()) {
            return abbr;
        }
        suffix += 1;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
