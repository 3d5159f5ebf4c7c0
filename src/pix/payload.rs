use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::crc::crc16_hex;
use super::error::{DecodeError, EncodeError};
use super::key::classify_key;
use super::normalize::normalize;
use super::tlv::{field, parse_fields, Field};

pub const PAYLOAD_FORMAT_INDICATOR: &str = "01";
pub const PIX_GUI: &str = "BR.GOV.BCB.PIX";
pub const MERCHANT_CATEGORY_CODE: &str = "0000";
/// ISO 4217 numeric code for BRL.
pub const CURRENCY_BRL: &str = "986";
pub const COUNTRY_CODE: &str = "BR";
/// Sent when the caller has no specific reference for the payment.
pub const NO_TRANSACTION_ID: &str = "***";

pub const MAX_MERCHANT_NAME_LEN: usize = 25;
pub const MAX_MERCHANT_CITY_LEN: usize = 15;
pub const MAX_TRANSACTION_ID_LEN: usize = 25;

/// Checksum tag and its fixed length. Part of the CRC input.
pub const CRC_PREFIX: &str = "6304";

pub mod tags {
    pub const PAYLOAD_FORMAT_INDICATOR: &str = "00";
    pub const MERCHANT_ACCOUNT_INFO: &str = "26";
    pub const MERCHANT_CATEGORY_CODE: &str = "52";
    pub const TRANSACTION_CURRENCY: &str = "53";
    pub const TRANSACTION_AMOUNT: &str = "54";
    pub const COUNTRY_CODE: &str = "58";
    pub const MERCHANT_NAME: &str = "59";
    pub const MERCHANT_CITY: &str = "60";
    pub const ADDITIONAL_DATA: &str = "62";
    pub const CRC: &str = "63";

    // Sub-tags of MERCHANT_ACCOUNT_INFO.
    pub const ACCOUNT_GUI: &str = "00";
    pub const ACCOUNT_KEY: &str = "01";

    // Sub-tag of ADDITIONAL_DATA.
    pub const REFERENCE_LABEL: &str = "05";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentCodeRequest {
    pub key: String,
    pub merchant_name: String,
    pub merchant_city: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl PaymentCodeRequest {
    pub fn new(
        key: impl Into<String>,
        merchant_name: impl Into<String>,
        merchant_city: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            key: key.into(),
            merchant_name: merchant_name.into(),
            merchant_city: merchant_city.into(),
            amount,
            transaction_id: None,
        }
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// The reference label as sent: truncated, `***` when absent or empty.
    pub fn reference_label(&self) -> String {
        match self.transaction_id.as_deref() {
            Some(id) if !id.is_empty() => id.chars().take(MAX_TRANSACTION_ID_LEN).collect(),
            _ => NO_TRANSACTION_ID.to_string(),
        }
    }

    /// Amounts are non-negative; callers check this before encoding.
    pub fn has_valid_amount(&self) -> bool {
        self.amount >= Decimal::ZERO
    }

    pub fn encode(&self) -> Result<String, EncodeError> {
        encode(self)
    }
}

/// Amount with exactly two fractional digits and a decimal point. Extra
/// digits are rounded half away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Builds every root field in order, followed by the `6304` checksum prefix.
pub fn assemble(req: &PaymentCodeRequest) -> Result<String, EncodeError> {
    let (kind, key) = classify_key(&req.key)?;

    let account_info = [
        field(tags::ACCOUNT_GUI, PIX_GUI)?,
        field(tags::ACCOUNT_KEY, &key)?,
    ]
    .concat();
    let additional_data = field(tags::REFERENCE_LABEL, &req.reference_label())?;

    let body = [
        field(tags::PAYLOAD_FORMAT_INDICATOR, PAYLOAD_FORMAT_INDICATOR)?,
        field(tags::MERCHANT_ACCOUNT_INFO, &account_info)?,
        field(tags::MERCHANT_CATEGORY_CODE, MERCHANT_CATEGORY_CODE)?,
        field(tags::TRANSACTION_CURRENCY, CURRENCY_BRL)?,
        field(tags::TRANSACTION_AMOUNT, &format_amount(req.amount))?,
        field(tags::COUNTRY_CODE, COUNTRY_CODE)?,
        field(tags::MERCHANT_NAME, &normalize(&req.merchant_name, MAX_MERCHANT_NAME_LEN))?,
        field(tags::MERCHANT_CITY, &normalize(&req.merchant_city, MAX_MERCHANT_CITY_LEN))?,
        field(tags::ADDITIONAL_DATA, &additional_data)?,
        CRC_PREFIX.to_string(),
    ]
    .concat();

    debug!("Assembled Pix payload body: {:?} key, {} chars", kind, body.len());
    Ok(body)
}

/// Produces the complete "copia e cola" code for `req`.
pub fn encode(req: &PaymentCodeRequest) -> Result<String, EncodeError> {
    let mut payload = assemble(req)?;
    let crc = crc16_hex(&payload);
    payload.push_str(&crc);
    Ok(payload)
}

/// Root fields of a payload whose checksum has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedPayload {
    pub fields: Vec<Field>,
    pub crc: String,
}

impl DecodedPayload {
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.tag == tag).map(|f| f.value.as_str())
    }
}

/// Parses `payload` into its root fields and checks the trailing CRC.
pub fn decode(payload: &str) -> Result<DecodedPayload, DecodeError> {
    let mut fields = parse_fields(payload)?;

    let crc = match fields.pop() {
        Some(last) if last.tag == tags::CRC && last.value.len() == 4 => last.value,
        _ => return Err(DecodeError::MissingChecksum),
    };

    // Everything up to and including "6304".
    let body_with_prefix = &payload[..payload.len() - crc.len()];
    let expected = crc16_hex(body_with_prefix);
    if !expected.eq_ignore_ascii_case(&crc) {
        return Err(DecodeError::ChecksumMismatch { expected, found: crc });
    }

    Ok(DecodedPayload {
        fields,
        crc: crc.to_ascii_uppercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> PaymentCodeRequest {
        PaymentCodeRequest::new("11987654321", "Loja Exemplo", "Sao Paulo", dec!(10.00))
            .with_transaction_id("ABC123")
    }

    #[test]
    fn test_encode_reference_payload() {
        assert_eq!(
            sample().encode().unwrap(),
            "00020126330014BR.GOV.BCB.PIX011111987654321520400005303986540510.00\
             5802BR5912LOJA EXEMPLO6009SAO PAULO62100506ABC12363047B25"
        );
    }

    #[test]
    fn test_encode_email_key_without_reference() {
        let req = PaymentCodeRequest::new(
            "fulano@example.com",
            "joão ç%$ gonçalves",
            "Toledo",
            dec!(149.9),
        );
        assert_eq!(
            encode(&req).unwrap(),
            "00020126400014BR.GOV.BCB.PIX0118fulano@example.com5204000053039865406149.90\
             5802BR5916JOAO C GONCALVES6006TOLEDO62070503***6304D306"
        );
    }

    #[test]
    fn test_encode_random_key() {
        let req = PaymentCodeRequest::new(
            "123e4567-e89b-12d3-a456-426614174000",
            "Loja",
            "Cidade",
            Decimal::ZERO,
        );
        assert_eq!(
            encode(&req).unwrap(),
            "00020126580014BR.GOV.BCB.PIX0136123e4567-e89b-12d3-a456-4266141740005204000053039865404\
             0.005802BR5904LOJA6006CIDADE62070503***63042819"
        );
    }

    #[test]
    fn test_assemble_ends_with_crc_prefix() {
        let body = assemble(&sample()).unwrap();
        assert!(body.ends_with("62100506ABC1236304"));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(10)), "10.00");
        assert_eq!(format_amount(dec!(0.5)), "0.50");
        assert_eq!(format_amount(dec!(1234567.89)), "1234567.89");
    }

    #[test]
    fn test_format_amount_rounds_extra_digits() {
        assert_eq!(format_amount(dec!(1.999)), "2.00");
        assert_eq!(format_amount(dec!(0.125)), "0.13");
        assert_eq!(format_amount(dec!(10.005)), "10.01");
        assert_eq!(format_amount(dec!(10.015)), "10.02");
        assert_eq!(format_amount(dec!(0.001)), "0.00");
    }

    #[test]
    fn test_unrounded_amount_is_rounded_in_payload() {
        let mut req = sample();
        req.amount = dec!(9.999);
        let decoded = decode(&req.encode().unwrap()).unwrap();
        assert_eq!(decoded.get(tags::TRANSACTION_AMOUNT), Some("10.00"));
    }

    #[test]
    fn test_has_valid_amount() {
        let mut req = sample();
        assert!(req.has_valid_amount());
        req.amount = Decimal::ZERO;
        assert!(req.has_valid_amount());
        req.amount = dec!(-0.001);
        assert!(!req.has_valid_amount());
        req.amount = dec!(-5);
        assert!(!req.has_valid_amount());
    }

    #[test]
    fn test_reference_label() {
        let req = sample();
        assert_eq!(req.reference_label(), "ABC123");
        assert_eq!(req.clone().with_transaction_id("").reference_label(), "***");
        assert_eq!(
            req.with_transaction_id("X".repeat(40)).reference_label(),
            "X".repeat(25)
        );
    }

    #[test]
    fn test_invalid_key() {
        let mut req = sample();
        req.key = "!!!".to_string();
        assert_eq!(encode(&req), Err(EncodeError::InvalidKey));
    }

    #[test]
    fn test_key_too_long_for_account_info() {
        let mut req = sample();
        req.key = format!("{}@example.com", "a".repeat(90));
        assert!(matches!(
            encode(&req),
            Err(EncodeError::ValueTooLong { ref tag, .. }) if tag == "01"
        ));

        // Fits the key sub-field but not the container around it.
        req.key = format!("{}@example.com", "a".repeat(70));
        assert!(matches!(
            encode(&req),
            Err(EncodeError::ValueTooLong { ref tag, .. }) if tag == "26"
        ));
    }

    #[test]
    fn test_decode_round_trip() {
        let decoded = decode(&sample().encode().unwrap()).unwrap();
        assert_eq!(decoded.crc, "7B25");
        assert_eq!(decoded.get(tags::MERCHANT_NAME), Some("LOJA EXEMPLO"));
        assert_eq!(decoded.get(tags::TRANSACTION_AMOUNT), Some("10.00"));
        assert_eq!(decoded.get(tags::CRC), None);
    }

    #[test]
    fn test_decode_accepts_lowercase_crc() {
        let payload = sample().encode().unwrap().replace("7B25", "7b25");
        assert_eq!(decode(&payload).unwrap().crc, "7B25");
    }

    #[test]
    fn test_decode_rejects_tampering() {
        let payload = sample().encode().unwrap().replace("10.00", "90.00");
        assert!(matches!(
            decode(&payload),
            Err(DecodeError::ChecksumMismatch { ref found, .. }) if found == "7B25"
        ));
    }

    #[test]
    fn test_decode_requires_checksum_field() {
        assert_eq!(decode("000201"), Err(DecodeError::MissingChecksum));
        assert_eq!(decode(""), Err(DecodeError::MissingChecksum));
        assert_eq!(decode("0002016303ABC"), Err(DecodeError::MissingChecksum));
    }
}
