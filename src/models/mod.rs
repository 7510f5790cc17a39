//! Data models representing database entities and API request types.

/// Bank account model
pub mod account;
/// Fund transfer model
pub mod transfer;
