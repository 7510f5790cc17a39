//! HTTP request handlers (route handlers).
//!
//! Each handler receives request data, validates its shape, delegates to
//! the services layer, and returns a JSON response.

/// Account management endpoints
pub mod accounts;
/// Health check endpoint
pub mod health;
/// Statement (transfer history) endpoint
pub mod statement;
/// Fund transfer endpoint
pub mod transfers;
