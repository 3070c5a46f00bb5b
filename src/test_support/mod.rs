//! Helpers shared by unit tests.

#![allow(clippy::unwrap_used)]

pub mod http_stub;
pub mod socket_guard;
