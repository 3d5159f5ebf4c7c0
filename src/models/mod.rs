pub mod coupon;
pub mod error;

pub use coupon::*;
pub use error::{ApiError, ErrorResponse};
