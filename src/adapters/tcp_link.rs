//! Single-peer TCP line server — the wireless command channel.
//!
//! The prop runs the listening side; the handset joins the soft-AP and
//! connects.  Everything is non-blocking: `accept` and `read` return
//! immediately, so the control tick can never stall on the network.
//! `std::net` behaves identically on ESP-IDF (lwIP-backed) and on the
//! host, which is what lets the integration suite drive a real socket.
//!
//! Only one peer at a time by design — a second connection is not
//! accepted until the current peer drops.  Any read or write error is
//! absorbed by dropping the peer; the next `accept` starts a clean
//! session.  A failed `bind` surfaces once to the boot path, which
//! downgrades to [`offline`](TcpLinkAdapter::offline) mode: local
//! key/tamper/countdown logic is untouched, only the protocol is gone.

use std::io::{ErrorKind, Read as _, Write as _};
use std::net::{TcpListener, TcpStream};

use log::{debug, info, warn};

use crate::app::ports::LinkPort;
use crate::error::LinkError;

pub struct TcpLinkAdapter {
    listener: Option<TcpListener>,
    peer: Option<TcpStream>,
}

impl TcpLinkAdapter {
    /// Bind the command channel on all interfaces.
    pub fn bind(port: u16) -> Result<Self, LinkError> {
        let listener = TcpListener::bind(("0.0.0.0", port)).map_err(|e| {
            warn!("link: bind on port {port} failed: {e}");
            LinkError::BindFailed
        })?;
        listener.set_nonblocking(true).map_err(|e| {
            warn!("link: non-blocking mode failed: {e}");
            LinkError::NonBlockingFailed
        })?;
        info!("link: listening on port {port}");
        Ok(Self {
            listener: Some(listener),
            peer: None,
        })
    }

    /// Permanently inert channel for degraded boot (and link-less tests).
    pub fn offline() -> Self {
        Self {
            listener: None,
            peer: None,
        }
    }

    /// The local port actually bound (useful when tests bind port 0).
    pub fn local_port(&self) -> Option<u16> {
        self.listener
            .as_ref()
            .and_then(|l| l.local_addr().ok())
            .map(|a| a.port())
    }

    fn accept_if_idle(&mut self) {
        if self.peer.is_some() {
            return;
        }
        let Some(listener) = self.listener.as_ref() else {
            return;
        };
        match listener.accept() {
            Ok((stream, addr)) => {
                if let Err(e) = stream.set_nonblocking(true) {
                    warn!("link: peer {addr} rejected, non-blocking failed: {e}");
                    return;
                }
                info!("link: peer connected from {addr}");
                self.peer = Some(stream);
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => {}
            Err(e) => debug!("link: accept error: {e}"),
        }
    }

    fn drop_peer(&mut self, why: &str) {
        if self.peer.take().is_some() {
            info!("link: peer dropped ({why})");
        }
    }
}

impl LinkPort for TcpLinkAdapter {
    fn read_pending(&mut self, buf: &mut [u8]) -> usize {
        self.accept_if_idle();
        let Some(peer) = self.peer.as_mut() else {
            return 0;
        };
        match peer.read(buf) {
            Ok(0) => {
                self.drop_peer("closed by remote");
                0
            }
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::WouldBlock => 0,
            Err(e) => {
                warn!("link: read error: {e}");
                self.drop_peer("read error");
                0
            }
        }
    }

    fn send_line(&mut self, line: &str) {
        let Some(peer) = self.peer.as_mut() else {
            return;
        };
        if let Err(e) = peer.write_all(line.as_bytes()) {
            warn!("link: {} — {e}", LinkError::WriteFailed);
            self.drop_peer("write error");
        }
    }

    fn peer_connected(&self) -> bool {
        self.peer.is_some()
    }
}
