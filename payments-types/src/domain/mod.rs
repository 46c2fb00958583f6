//! Domain models for the payment service.

pub mod paged;
pub mod payment;

pub use paged::PagedResult;
pub use payment::{Payment, PaymentId, PaymentStatus};
