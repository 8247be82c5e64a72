//! Port helpers for locally spawned drivers.

use std::net::TcpListener;

/// Asks the OS for an unused localhost port.
///
/// The listener is released before returning, so the port is only reserved
/// until someone else binds it.
pub fn pick_free_port() -> std::io::Result<u16> {
	let listener = TcpListener::bind(("127.0.0.1", 0))?;
	Ok(listener.local_addr()?.port())
}
