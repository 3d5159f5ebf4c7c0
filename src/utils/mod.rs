pub mod payment_code;
