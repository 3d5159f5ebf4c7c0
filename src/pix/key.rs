use super::error::EncodeError;

/// Random keys are UUIDs (36 chars); shorter dashed strings are phone or document keys.
const RANDOM_KEY_MIN_LEN: usize = 31;

/// How a Pix key must be transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Contains `@`; sent verbatim.
    Email,
    /// UUID-shaped random key; sent verbatim.
    Random,
    /// CPF, CNPJ or phone; punctuation is stripped.
    DocumentOrPhone,
}

impl KeyKind {
    /// First match wins: email, then random key, then document/phone.
    pub fn classify(raw: &str) -> Self {
        if raw.contains('@') {
            KeyKind::Email
        } else if raw.chars().count() >= RANDOM_KEY_MIN_LEN && raw.contains('-') {
            KeyKind::Random
        } else {
            KeyKind::DocumentOrPhone
        }
    }

    fn apply(self, raw: &str) -> String {
        match self {
            KeyKind::Email | KeyKind::Random => raw.trim().to_string(),
            KeyKind::DocumentOrPhone => raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect(),
        }
    }
}

/// Classifies `raw` and returns its kind with the form carried in the
/// merchant account field.
pub fn classify_key(raw: &str) -> Result<(KeyKind, String), EncodeError> {
    let kind = KeyKind::classify(raw);
    let key = kind.apply(raw);
    if key.is_empty() {
        return Err(EncodeError::InvalidKey);
    }
    Ok((kind, key))
}

/// The key as carried in the merchant account field.
pub fn normalize_key(raw: &str) -> Result<String, EncodeError> {
    classify_key(raw).map(|(_, key)| key)
}
