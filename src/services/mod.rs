//! Session actions used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Each action is a single stateless request/response cycle that never fails
//! past its own boundary: errors are logged and folded into an outcome value
//! so route handlers only translate outcomes into responses.

pub mod cookie;
pub mod login;
pub mod register;
pub mod upstream;
