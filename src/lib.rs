//! Static Pix payment codes for installment coupons and receipts.
//!
//! [`pix::encode`] is the whole encoder; the remaining modules expose it to
//! the document renderer over HTTP.

pub mod config;
pub mod handlers;
pub mod models;
pub mod pix;
pub mod routes;
pub mod services;
pub mod utils;
