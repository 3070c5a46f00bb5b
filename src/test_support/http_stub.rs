//! Hand-written HTTP responses that wiremock cannot produce.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves every connection a `200 OK` that announces `declared_len` bytes,
/// sends only `body`, then closes the socket.
///
/// Returns the base URL of the server.
pub fn spawn_truncated_body_server(
    listener: TcpListener,
    declared_len: usize,
    body: &'static [u8],
) -> String {
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0_u8; 4096];
            let _ = socket.read(&mut request).await;
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {declared_len}\r\nConnection: close\r\n\r\n"
            );
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(body).await;
            let _ = socket.flush().await;
        }
    });
    format!("http://{addr}")
}
