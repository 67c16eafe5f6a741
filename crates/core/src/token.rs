//! Byte serialization of LZ77 triples for the entropy stage.
//!
//! # Record Format
//!
//! ```text
//! +------------------+
//! | offset (4)       |  u32 little-endian
//! +------------------+
//! | length (4)       |  u32 little-endian
//! +------------------+
//! | literal_len (1)  |  u8, 0 = no literal
//! +------------------+
//! | literal          |  UTF-8 bytes of one char (literal_len bytes)
//! | (0-4)            |
//! +------------------+
//! ```
//!
//! Records are concatenated with no separator. Fields are length-delimited,
//! so literal characters can never be mistaken for structure.

use crate::error::{Result, TokenError};
use crate::lz77::Triple;

/// Size of the fixed part of a record in bytes
const HEADER_SIZE: usize = 9;

fn field_u32(field: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| TokenError::FieldOverflow { field, value }.into())
}

/// Serialize `triples` into a flat byte string.
///
/// # Errors
/// Returns `TokenError::FieldOverflow` if an offset or length exceeds `u32`.
pub fn serialize_triples(triples: &[Triple]) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(triples.len() * (HEADER_SIZE + 1));
    let mut utf8 = [0u8; 4];

    for triple in triples {
        bytes.extend_from_slice(&field_u32("offset", triple.offset)?.to_le_bytes());
        bytes.extend_from_slice(&field_u32("length", triple.length)?.to_le_bytes());

        match triple.literal {
            Some(c) => {
                let encoded = c.encode_utf8(&mut utf8);
                bytes.push(encoded.len() as u8);
                bytes.extend_from_slice(encoded.as_bytes());
            }
            None => bytes.push(0),
        }
    }

    Ok(bytes)
}

/// Parse a byte string produced by [`serialize_triples`].
///
/// # Errors
/// - `TokenError::Truncated` if a record is cut short
/// - `TokenError::InvalidLiteral` if literal bytes are not exactly one char
pub fn parse_triples(bytes: &[u8]) -> Result<Vec<Triple>> {
    let mut triples = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let remaining = bytes.len() - pos;
        if remaining < HEADER_SIZE {
            return Err(TokenError::Truncated {
                needed: HEADER_SIZE,
                available: remaining,
            }
            .into());
        }

        let offset = read_u32(&bytes[pos..pos + 4]) as usize;
        let length = read_u32(&bytes[pos + 4..pos + 8]) as usize;
        let literal_len = bytes[pos + 8] as usize;

        let literal_start = pos + HEADER_SIZE;
        let literal_end = literal_start + literal_len;
        if literal_end > bytes.len() {
            return Err(TokenError::Truncated {
                needed: HEADER_SIZE + literal_len,
                available: remaining,
            }
            .into());
        }

        let literal = if literal_len == 0 {
            None
        } else {
            Some(parse_literal(&bytes[literal_start..literal_end], literal_start)?)
        };

        triples.push(Triple::new(offset, length, literal));
        pos = literal_end;
    }

    Ok(triples)
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut le = [0u8; 4];
    le.copy_from_slice(bytes);
    u32::from_le_bytes(le)
}

fn parse_literal(bytes: &[u8], position: usize) -> Result<char> {
    let text = std::str::from_utf8(bytes).map_err(|_| TokenError::InvalidLiteral { position })?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(TokenError::InvalidLiteral { position }.into()),
    }
}
