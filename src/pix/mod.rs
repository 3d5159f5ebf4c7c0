//! Static Pix "copia e cola" payloads: EMV merchant-presented TLV fields
//! closed by a CRC-16/CCITT-FALSE checksum.

pub mod crc;
mod error;
pub mod key;
pub mod normalize;
pub mod payload;
pub mod tlv;

pub use crc::{crc16, crc16_hex};
pub use error::{DecodeError, EncodeError};
pub use key::{classify_key, normalize_key, KeyKind};
pub use normalize::normalize;
pub use payload::{assemble, decode, encode, DecodedPayload, PaymentCodeRequest};
pub use tlv::{field, parse_fields, Field};
