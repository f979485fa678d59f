//! Session boundary for the web front-end.
//!
//! Owns the pieces that hold session state outside the backend: the client's
//! token store, the server's session cookie, and the registration/login
//! proxies that talk to the backend API on the UI's behalf.

pub mod config;
pub mod envelope;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
