use serde::Serialize;

use super::error::{DecodeError, EncodeError};

/// The length of a value is carried in two decimal digits.
pub const MAX_VALUE_LEN: usize = 99;

/// Encodes one `tag + length + value` record. Container fields pass the
/// concatenated output of their children as `value`.
pub fn field(tag: &str, value: &str) -> Result<String, EncodeError> {
    debug_assert!(tag.len() == 2 && tag.bytes().all(|b| b.is_ascii_digit()));

    let len = value.chars().count();
    if len > MAX_VALUE_LEN {
        return Err(EncodeError::ValueTooLong { tag: tag.to_string(), len });
    }
    Ok(format!("{}{:02}{}", tag, len, value))
}

/// A record read back from an encoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub tag: String,
    pub value: String,
}

impl Field {
    /// Reads the value of a container field as nested records.
    pub fn children(&self) -> Result<Vec<Field>, DecodeError> {
        parse_fields(&self.value)
    }
}

/// Splits `input` into consecutive records. Lengths count characters, matching
/// [`field`].
pub fn parse_fields(input: &str) -> Result<Vec<Field>, DecodeError> {
    let mut fields = Vec::new();
    let mut rest = input;
    let mut offset = 0;

    while !rest.is_empty() {
        let header = rest.get(..4).ok_or(DecodeError::Truncated(offset))?;
        if !header.is_ascii() {
            return Err(DecodeError::InvalidLength(offset));
        }
        let (tag, len) = header.split_at(2);
        if !len.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecodeError::InvalidLength(offset + 2));
        }
        let len: usize = len.parse().map_err(|_| DecodeError::InvalidLength(offset + 2))?;

        let body = &rest[4..];
        let end = match body.char_indices().nth(len) {
            Some((idx, _)) => idx,
            None if body.chars().count() == len => body.len(),
            None => return Err(DecodeError::Truncated(offset)),
        };

        fields.push(Field {
            tag: tag.to_string(),
            value: body[..end].to_string(),
        });
        offset += 4 + end;
        rest = &body[end..];
    }

    Ok(fields)
}
