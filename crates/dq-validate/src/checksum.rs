//! Check-digit algorithms, selected by the rule table.
//!
//! Control flow never branches on country: a rule names an algorithm id
//! and the dispatch below runs it, so adding a country means adding one
//! function and one match arm.

use dq_rules::ChecksumAlgorithm;

/// Result of recomputing a check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumResult {
    /// Supplied digit matches the recomputed one.
    Ok,
    /// Digits disagree.
    Mismatch { expected: u8, supplied: u8 },
    /// No valid check digit exists for these digits (e.g. mod-11 rest 10),
    /// or the value has the wrong shape for the algorithm.
    Undefined,
}

/// Run `algorithm` over the significant digits of a normalized value.
pub fn verify(algorithm: ChecksumAlgorithm, value: &str) -> ChecksumResult {
    let digits: Vec<u8> = value
        .chars()
        .filter(char::is_ascii_digit)
        .map(|c| c as u8 - b'0')
        .collect();
    match algorithm {
        ChecksumAlgorithm::ArCuitMod11 => ar_cuit_mod11(&digits),
    }
}

/// Expected check digit for the algorithm, given all significant digits
/// including the supplied check digit. Used for round-trip tests and
/// re-entry prompts.
pub fn expected_digit(algorithm: ChecksumAlgorithm, value: &str) -> Option<u8> {
    let digits: Vec<u8> = value
        .chars()
        .filter(char::is_ascii_digit)
        .map(|c| c as u8 - b'0')
        .collect();
    match algorithm {
        ChecksumAlgorithm::ArCuitMod11 => ar_cuit_expected(&digits),
    }
}

const CUIT_WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Argentine CUIT/CUIL: weight the first ten digits, sum, mod 11;
/// check digit is `11 - remainder`, with 11 -> 0 and 10 -> no valid digit.
fn ar_cuit_mod11(digits: &[u8]) -> ChecksumResult {
    let Some(expected) = ar_cuit_expected(digits) else {
        return ChecksumResult::Undefined;
    };
    let supplied = digits[10];
    if expected == supplied {
        ChecksumResult::Ok
    } else {
        ChecksumResult::Mismatch { expected, supplied }
    }
}

fn ar_cuit_expected(digits: &[u8]) -> Option<u8> {
    if digits.len() != 11 {
        return None;
    }
    let sum: u32 = digits[..10]
        .iter()
        .zip(CUIT_WEIGHTS)
        .map(|(digit, weight)| u32::from(*digit) * weight)
        .sum();
    match 11 - (sum % 11) {
        11 => Some(0),
        10 => None,
        digit => Some(digit as u8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_valid_cuit() {
        // 30-22345678-9: weighted sum of 3022345678 is 156, remainder 2,
        // so the check digit is 11 - 2 = 9.
        assert_eq!(
            verify(ChecksumAlgorithm::ArCuitMod11, "30-22345678-9"),
            ChecksumResult::Ok
        );
        assert_eq!(
            expected_digit(ChecksumAlgorithm::ArCuitMod11, "30-22345678-9"),
            Some(9)
        );
    }

    #[test]
    fn transcription_error_reports_both_digits() {
        assert_eq!(
            verify(ChecksumAlgorithm::ArCuitMod11, "30-22345678-0"),
            ChecksumResult::Mismatch {
                expected: 9,
                supplied: 0
            }
        );
    }

    #[test]
    fn remainder_eleven_maps_to_zero() {
        // All-zero prefix: sum 0, remainder 0, 11 - 0 = 11 -> digit 0.
        assert_eq!(
            verify(ChecksumAlgorithm::ArCuitMod11, "00-00000000-0"),
            ChecksumResult::Ok
        );
    }

    #[test]
    fn wrong_length_is_undefined() {
        assert_eq!(
            verify(ChecksumAlgorithm::ArCuitMod11, "30-1234-9"),
            ChecksumResult::Undefined
        );
    }

    #[test]
    fn remainder_ten_has_no_valid_digit() {
        // Find a prefix whose weighted sum % 11 == 1 (11 - 1 = 10).
        // 20-00000001-x: sum = 2*5 + 1*2 = 12, 12 % 11 = 1 -> undefined.
        assert_eq!(
            verify(ChecksumAlgorithm::ArCuitMod11, "20-00000001-0"),
            ChecksumResult::Undefined
        );
    }
}
