use std::sync::Arc;
use log::{info, error};

use crate::config::MerchantProfile;
use crate::models::{ApiError, CouponBatchResponse, CouponCode, Installment};
use crate::pix::PaymentCodeRequest;
use crate::utils::payment_code::installment_transaction_id;

/// Produces the payment codes printed on installment coupons for the
/// configured store.
#[derive(Clone)]
pub struct CouponService {
    profile: Arc<MerchantProfile>,
}

impl CouponService {
    pub fn new(profile: MerchantProfile) -> Self {
        Self { profile: Arc::new(profile) }
    }

    pub fn profile(&self) -> &MerchantProfile {
        &self.profile
    }

    fn pix_key(&self) -> Result<&str, ApiError> {
        self.profile
            .pix_key()
            .ok_or_else(|| ApiError::NotFound("No Pix key configured for this store".to_string()))
    }

    /// One code per installment. A failure on one installment is logged and
    /// leaves its `payload` empty instead of failing the batch.
    pub fn coupon_codes(
        &self,
        financing_id: &str,
        installments: &[Installment],
    ) -> Result<CouponBatchResponse, ApiError> {
        let key = self.pix_key()?;
        let merchant_name = self.profile.payee_name();
        let merchant_city = self.profile.payee_city();

        info!("Generating {} coupon codes for financing {}", installments.len(), financing_id);

        let coupons = installments
            .iter()
            .map(|installment| {
                let transaction_id = installment_transaction_id(financing_id, &installment.id);
                let request = PaymentCodeRequest::new(key, merchant_name, merchant_city, installment.amount)
                    .with_transaction_id(transaction_id.clone());

                let payload = match request.encode() {
                    Ok(payload) => Some(payload),
                    Err(e) => {
                        error!("Failed to generate Pix code for installment {}: {}", installment.id, e);
                        None
                    }
                };

                CouponCode {
                    installment_id: installment.id.clone(),
                    number: installment.number,
                    amount: installment.amount,
                    transaction_id,
                    payload,
                }
            })
            .collect();

        Ok(CouponBatchResponse {
            financing_id: financing_id.to_string(),
            merchant_name: merchant_name.to_string(),
            merchant_city: merchant_city.to_string(),
            coupons,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pix::{decode, payload::tags};
    use rust_decimal_macros::dec;

    fn profile(pix_key: Option<&str>) -> MerchantProfile {
        MerchantProfile {
            pix_key: pix_key.map(str::to_string),
            pix_city: None,
            city: Some("São Paulo".to_string()),
            legal_name: None,
            name: Some("Loja Exemplo".to_string()),
        }
    }

    fn installment(id: &str, number: u32) -> Installment {
        Installment { id: id.to_string(), number, amount: dec!(89.90) }
    }

    #[test]
    fn test_coupon_codes_per_installment() {
        let service = CouponService::new(profile(Some("11987654321")));
        assert_eq!(service.profile().payee_city(), "São Paulo");
        let batch = service
            .coupon_codes("1042", &[installment("7", 1), installment("8", 2)])
            .unwrap();

        assert_eq!(batch.merchant_name, "Loja Exemplo");
        assert_eq!(batch.coupons.len(), 2);
        assert_eq!(batch.coupons[0].transaction_id, "10427");
        assert_eq!(batch.coupons[1].transaction_id, "10428");

        let decoded = decode(batch.coupons[1].payload.as_deref().unwrap()).unwrap();
        assert_eq!(decoded.get(tags::MERCHANT_CITY), Some("SAO PAULO"));
        assert_eq!(decoded.get(tags::TRANSACTION_AMOUNT), Some("89.90"));
        assert_eq!(decoded.get(tags::ADDITIONAL_DATA), Some("050510428"));
    }

    #[test]
    fn test_invalid_key_leaves_coupon_without_code() {
        let service = CouponService::new(profile(Some("(--)")));
        let batch = service.coupon_codes("1042", &[installment("7", 1)]).unwrap();
        assert_eq!(batch.coupons.len(), 1);
        assert_eq!(batch.coupons[0].payload, None);
    }

    #[test]
    fn test_no_pix_key_configured() {
        let service = CouponService::new(profile(None));
        let result = service.coupon_codes("1042", &[installment("7", 1)]);
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
