//! Property: for any CUIT whose check digit is defined, appending the
//! recomputed digit always verifies.

use dq_rules::ChecksumAlgorithm;
use dq_validate::{ChecksumResult, expected_digit, verify};
use proptest::prelude::*;

proptest! {
    #[test]
    fn recomputed_digit_verifies(prefix in proptest::collection::vec(0u8..=9, 10)) {
        let body: String = prefix.iter().map(|d| char::from(b'0' + d)).collect();
        // Probe with a placeholder digit; expected_digit only reads the
        // first ten.
        let probe = format!("{body}0");
        match expected_digit(ChecksumAlgorithm::ArCuitMod11, &probe) {
            Some(digit) => {
                let id = format!("{}-{}-{}", &body[..2], &body[2..], digit);
                prop_assert_eq!(
                    verify(ChecksumAlgorithm::ArCuitMod11, &id),
                    ChecksumResult::Ok
                );
                // And every other digit is rejected with the right pair.
                let wrong = (digit + 1) % 10;
                let bad = format!("{}-{}-{}", &body[..2], &body[2..], wrong);
                prop_assert_eq!(
                    verify(ChecksumAlgorithm::ArCuitMod11, &bad),
                    ChecksumResult::Mismatch { expected: digit, supplied: wrong }
                );
            }
            None => {
                // Remainder 10: no digit makes this prefix valid.
                for digit in 0..=9u8 {
                    let id = format!("{body}{digit}");
                    prop_assert_eq!(
                        verify(ChecksumAlgorithm::ArCuitMod11, &id),
                        ChecksumResult::Undefined
                    );
                }
            }
        }
    }
}
