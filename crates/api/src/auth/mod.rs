//! Access-token verification.
//!
//! Tokens are issued by the portal's sign-in flow; this service only
//! verifies them. [`jwt::generate_access_token`] exists for tests and
//! operator tooling.

pub mod jwt;
