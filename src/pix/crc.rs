const POLY: u16 = 0x1021;
const INIT: u16 = 0xFFFF;

/// CRC-16/CCITT-FALSE: poly 0x1021, init 0xFFFF, no reflection, no final xor.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = INIT;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ POLY } else { crc << 1 };
        }
    }
    crc
}

/// Checksum of `body_with_prefix` as the 4 uppercase hex digits appended to a payload.
pub fn crc16_hex(body_with_prefix: &str) -> String {
    format!("{:04X}", crc16(body_with_prefix.as_bytes()))
}
