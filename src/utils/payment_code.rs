use crate::pix::payload::MAX_TRANSACTION_ID_LEN;

/// Reference label for one installment: financing id followed by installment
/// id, cut to the 25 characters the additional data field allows.
pub fn installment_transaction_id(financing_id: &str, installment_id: &str) -> String {
    financing_id
        .chars()
        .chain(installment_id.chars())
        .take(MAX_TRANSACTION_ID_LEN)
        .collect()
}
