mod handlers;
mod routes;
mod state;

use std::io::{self, ErrorKind};

use tokio::net::TcpListener;

pub use handlers::ClassifyResponse;
pub use routes::create_router;
pub use state::AppState;

/// Binds the first free port in `start_port..start_port + attempts`.
///
/// Only `AddrInUse` moves on to the next port; any other bind error is
/// returned as is.
pub async fn bind_available(host: &str, start_port: u16, attempts: u16) -> io::Result<TcpListener> {
    let mut last_err = None;

    for offset in 0..attempts.max(1) {
        let Some(port) = start_port.checked_add(offset) else {
            break;
        };

        match TcpListener::bind((host, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == ErrorKind::AddrInUse => {
                tracing::debug!("Port {} is in use, trying the next one", port);
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            ErrorKind::AddrInUse,
            format!("no free port starting at {start_port}"),
        )
    }))
}
