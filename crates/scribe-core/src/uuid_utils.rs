//! UUID utilities: v7 generation for new rows and strict parsing for
//! caller-supplied identifiers.
//!
//! UUIDv7 embeds a millisecond timestamp in the first 48 bits, so ids are
//! time-ordered and index-friendly. Caller ids are accepted only in the
//! 36-character hyphenated form; `Uuid::parse_str` alone would also accept
//! braced, URN, and un-hyphenated encodings, which the public interface
//! does not.

use uuid::Uuid;

use crate::error::{Error, Result};

/// Generate a new UUIDv7 identifier.
///
/// # Example
///
/// ```
/// use scribe_core::uuid_utils::new_v7;
///
/// let id = new_v7();
/// // IDs generated later will be lexicographically greater
/// ```
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

/// Check if a UUID is version 7.
#[inline]
pub fn is_v7(uuid: &Uuid) -> bool {
    uuid.get_version_num() == 7
}

/// Parse a caller-supplied id, accepting only the hyphenated
/// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` form (case-insensitive).
///
/// Fails with [`Error::InvalidId`] before any lookup happens, so malformed
/// ids never reach the database.
pub fn parse_id(input: &str) -> Result<Uuid> {
    if !is_hyphenated_uuid(input) {
        return Err(Error::InvalidId(input.to_string()));
    }
    Uuid::parse_str(input).map_err(|_| Error::InvalidId(input.to_string()))
}

fn is_hyphenated_uuid(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    for (i, b) in bytes.iter().enumerate() {
        match i {
            8 | 13 | 18 | 23 => {
                if *b != b'-' {
                    return false;
                }
            }
            _ => {
                if !b.is_ascii_hexdigit() {
                    return false;
                }
            }
        }
    }
    true
}
