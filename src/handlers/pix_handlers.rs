use actix_web::{web, HttpResponse};
use log::{info, error};
use rust_decimal::Decimal;

use crate::models::{ApiError, CouponBatchRequest, DecodeRequest, PayloadResponse};
use crate::pix::{self, PaymentCodeRequest};
use crate::services::CouponService;

/// Encode a single payment code from explicit payee data
pub async fn create_payload(
    request: web::Json<PaymentCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    if !request.has_valid_amount() {
        return Err(ApiError::ValidationError(format!(
            "Amount must not be negative: {}",
            request.amount
        )));
    }

    let payload = pix::encode(&request).map_err(|e| {
        error!("Failed to encode Pix payload: {}", e);
        ApiError::from(e)
    })?;

    info!("Encoded Pix payload of {} chars", payload.len());
    Ok(HttpResponse::Ok().json(PayloadResponse { payload }))
}

/// Codes for every installment coupon of a financing, using the store profile
pub async fn create_coupon_codes(
    coupon_service: web::Data<CouponService>,
    request: web::Json<CouponBatchRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    if let Some(bad) = request.installments.iter().find(|i| i.amount < Decimal::ZERO) {
        return Err(ApiError::ValidationError(format!(
            "Installment {} has a negative amount",
            bad.id
        )));
    }

    let batch = coupon_service.coupon_codes(&request.financing_id, &request.installments)?;
    Ok(HttpResponse::Ok().json(batch))
}

/// Parse a payment code and verify its checksum
pub async fn decode_payload(
    request: web::Json<DecodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let decoded = pix::decode(request.payload.trim())?;
    Ok(HttpResponse::Ok().json(decoded))
}
