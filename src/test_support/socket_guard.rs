//! Localhost socket checks for unit tests that need a live server.
//!
//! Sandboxed runners sometimes forbid binding sockets. Tests call these
//! helpers and return early in that case, unless
//! `WORKSHOP_DL_REQUIRE_SOCKET_TESTS` asks for a hard failure.

use std::net::TcpListener;

use wiremock::MockServer;

const REQUIRE_ENV: &str = "WORKSHOP_DL_REQUIRE_SOCKET_TESTS";

fn socket_tests_required() -> bool {
    std::env::var(REQUIRE_ENV)
        .ok()
        .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

fn skip_or_fail(reason: &str) -> bool {
    if socket_tests_required() {
        panic!("[socket-bound-test] {reason}; unset {REQUIRE_ENV} to allow skipping");
    }
    eprintln!("[socket-bound-test] {reason}; skipping test");
    true
}

fn should_skip_socket_bound_test() -> bool {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return false;
    }
    skip_or_fail("cannot bind a localhost socket")
}

/// Starts a wiremock server, or returns `None` when sockets are unavailable.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if should_skip_socket_bound_test() {
        None
    } else {
        Some(MockServer::start().await)
    }
}

/// Binds a raw listener on an ephemeral localhost port for hand-written
/// HTTP responses, or returns `None` when sockets are unavailable.
pub async fn bind_local_listener_or_skip() -> Option<tokio::net::TcpListener> {
    match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => Some(listener),
        Err(error) => {
            skip_or_fail(&format!("cannot bind a localhost socket: {error}"));
            None
        }
    }
}
