//! Quoted-decimal encoding for 64-bit IDs.
//!
//! JSON consumers with 53-bit integer precision silently corrupt large IDs, so
//! IDs travel as strings instead: `12345` becomes `"12345"`.

use core::{fmt, str};

use crate::DecodeError;

/// Length of `"18446744073709551615"` including both quotes.
const MAX_QUOTED_LEN: usize = 22;

/// A `u64` rendered as a quoted decimal string, stored inline.
///
/// Produced by [`encode`]. No allocation is involved.
#[derive(Clone, Copy)]
pub struct QuotedDecimal {
    buf: [u8; MAX_QUOTED_LEN],
    start: usize,
}

impl QuotedDecimal {
    /// The quoted form, e.g. `"12345"` (with the quotes).
    pub fn as_str(&self) -> &str {
        // Only ASCII digits and quotes are ever written.
        str::from_utf8(&self.buf[self.start..]).unwrap_or_default()
    }

    /// The digits without quotes, e.g. `12345`.
    pub fn digits(&self) -> &str {
        let quoted = self.as_str();
        &quoted[1..quoted.len() - 1]
    }

    /// The quoted form as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[self.start..]
    }
}

impl fmt::Display for QuotedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for QuotedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("QuotedDecimal").field(&self.as_str()).finish()
    }
}

impl PartialEq<str> for QuotedDecimal {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for QuotedDecimal {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Encodes `value` as a quoted decimal string with no sign and no leading
/// zeros.
///
/// # Example
/// ```
/// assert_eq!(snowmint::encode(12345).as_str(), "\"12345\"");
/// assert_eq!(snowmint::encode(0).as_str(), "\"0\"");
/// ```
pub fn encode(value: u64) -> QuotedDecimal {
    let mut buf = [0u8; MAX_QUOTED_LEN];
    let mut pos = MAX_QUOTED_LEN - 1;
    buf[pos] = b'"';

    let mut n = value;
    loop {
        pos -= 1;
        buf[pos] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }

    pos -= 1;
    buf[pos] = b'"';
    QuotedDecimal { buf, start: pos }
}

/// Decodes a quoted decimal string such as `"12345"` (quotes included).
///
/// # Errors
///
/// - [`DecodeError::Unquoted`] if the input is not wrapped in `"`
/// - [`DecodeError::Empty`] if there is nothing between the quotes
/// - [`DecodeError::Negative`] if the value starts with `-`
/// - [`DecodeError::InvalidDigit`] on any other non-digit byte
/// - [`DecodeError::Overflow`] if the value exceeds [`u64::MAX`]
///
/// # Example
/// ```
/// use snowmint::{DecodeError, decode};
///
/// assert_eq!(decode(b"\"12345\""), Ok(12345));
/// assert_eq!(decode(b"12345"), Err(DecodeError::Unquoted));
/// assert_eq!(decode(b"\"-1\""), Err(DecodeError::Negative));
/// ```
pub fn decode(input: &[u8]) -> Result<u64, DecodeError> {
    match input {
        [b'"', body @ .., b'"'] => decode_bytes(body),
        _ => Err(DecodeError::Unquoted),
    }
}

/// Decodes the unquoted digits of a decimal ID, e.g. `12345`.
///
/// Leading zeros are accepted. A sign of either kind is not.
///
/// # Errors
///
/// Same as [`decode`], except that quotes are not expected.
pub fn decode_digits(digits: &str) -> Result<u64, DecodeError> {
    decode_bytes(digits.as_bytes())
}

fn decode_bytes(digits: &[u8]) -> Result<u64, DecodeError> {
    if digits.is_empty() {
        return Err(DecodeError::Empty);
    }
    if digits[0] == b'-' {
        return Err(DecodeError::Negative);
    }

    digits
        .iter()
        .enumerate()
        .try_fold(0u64, |acc, (offset, &byte)| {
            if !byte.is_ascii_digit() {
                return Err(DecodeError::InvalidDigit { byte, offset });
            }
            acc.checked_mul(10)
                .and_then(|acc| acc.checked_add(u64::from(byte - b'0')))
                .ok_or(DecodeError::Overflow)
        })
}
