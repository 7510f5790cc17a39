//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers:
//! the business-day oracle, the ledger store boundary, and the transfer
//! engine that orchestrates them.

pub mod business_day;
pub mod ledger;
pub mod transfer_service;
