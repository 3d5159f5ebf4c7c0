use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PayloadResponse {
    pub payload: String,
}

/// One installment of a financing, as held by the installment ledger.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Installment {
    pub id: String,
    pub number: u32,
    pub amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CouponBatchRequest {
    pub financing_id: String,
    pub installments: Vec<Installment>,
}

/// Payment code printed on one installment coupon. `payload` is `None` when
/// the code could not be produced; the coupon is still printed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CouponCode {
    pub installment_id: String,
    pub number: u32,
    pub amount: Decimal,
    pub transaction_id: String,
    pub payload: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CouponBatchResponse {
    pub financing_id: String,
    pub merchant_name: String,
    pub merchant_city: String,
    pub coupons: Vec<CouponCode>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DecodeRequest {
    pub payload: String,
}
