//! Phone Number Normalization
//!
//! Converts raw user-entered text into the canonical digit string the rest
//! of the wizard operates on. Carrier detection and the recipient-entry
//! gate only ever see the output of these functions, never raw input.

/// Minimum digit count required to leave the recipient-entry step.
pub const MIN_RECIPIENT_DIGITS: usize = 9;

/// Afghanistan country code, stripped by [`canonicalize`].
const COUNTRY_CODE: &str = "93";

/// Strip every character that is not a decimal digit.
///
/// Digit order is preserved. No length limit is enforced at this stage.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize, then strip one leading country code.
///
/// A leading `93` is removed only when at least [`MIN_RECIPIENT_DIGITS`]
/// digits remain afterwards, so a local number that happens to start with
/// `93` is left untouched. This is the canonical form stored in the draft:
/// a pasted `"+93 79-123 4567"` becomes `"791234567"` and detection sees
/// the subscriber prefix `79`, not the country code.
pub fn canonicalize(raw: &str) -> String {
    let digits = normalize(raw);
    match digits.strip_prefix(COUNTRY_CODE) {
        Some(rest) if rest.len() >= MIN_RECIPIENT_DIGITS => rest.to_string(),
        _ => digits,
    }
}

/// Check the recipient-entry gate.
#[inline]
pub fn meets_min_length(number: &str) -> bool {
    number.len() >= MIN_RECIPIENT_DIGITS
}
