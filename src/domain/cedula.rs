//! Ecuadorian national identity number (cédula) check digit.
//!
//! A cédula is ten ASCII digits. The first nine are weighted with the
//! alternating coefficients `2,1,2,1,...`; any product above 9 is reduced by 9,
//! and the tenth digit must equal the distance from the sum to the next
//! multiple of ten (or 0 when the sum is already a multiple of ten).

pub const CEDULA_LEN: usize = 10;

const COEFFICIENTS: [u32; CEDULA_LEN - 1] = [2, 1, 2, 1, 2, 1, 2, 1, 2];

/// Computes the expected check digit for the first nine digits of `prefix`.
///
/// Returns `None` unless `prefix` holds at least nine leading ASCII digits.
pub fn check_digit(prefix: &str) -> Option<u32> {
    let bytes = prefix.as_bytes();
    if bytes.len() < COEFFICIENTS.len() {
        return None;
    }

    let mut sum = 0;
    for (byte, coefficient) in bytes.iter().zip(COEFFICIENTS) {
        let digit = char::from(*byte).to_digit(10)?;
        let product = digit * coefficient;
        sum += if product > 9 { product - 9 } else { product };
    }

    Some(match sum % 10 {
        0 => 0,
        rem => 10 - rem,
    })
}

/// Returns true iff `id` is a well-formed cédula with a matching check digit.
pub fn checksum_valid(id: &str) -> bool {
    if id.len() != CEDULA_LEN || !id.bytes().all(|byte| byte.is_ascii_digit()) {
        return false;
    }

    let verifier = u32::from(id.as_bytes()[CEDULA_LEN - 1] - b'0');
    check_digit(id) == Some(verifier)
}
