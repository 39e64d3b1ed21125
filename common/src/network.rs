//! Network-address status source.
//!
//! The status bar shows the address of the interface that carries the
//! default route. A UDP socket "connected" to a public address makes the
//! kernel pick that interface without sending any packet; the socket's local
//! address is then the one we want.

use core::fmt::Write;
use std::io;
use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::time::Duration;

use heapless::String;
use log::debug;

use crate::config::STATUS_TEXT_LEN;
use crate::scheduler::{StatusSource, status_string};

/// Text shown when no address can be determined.
pub const NO_ADDRESS: &str = "No IP";

const PROBE_TIMEOUT: Duration = Duration::from_millis(50);

/// Reports the host's outbound IP address, or [`NO_ADDRESS`].
pub struct LocalAddress {
    target: SocketAddr,
    last: Option<IpAddr>,
}

impl LocalAddress {
    /// Probe via a well-known public resolver; nothing is ever sent to it.
    pub fn new() -> Self { Self::with_target(SocketAddr::from(([8, 8, 8, 8], 80))) }

    /// Probe against a different target address.
    pub fn with_target(target: SocketAddr) -> Self { Self { target, last: None } }

    /// Look up the outbound address once.
    pub fn lookup(&self) -> io::Result<IpAddr> {
        let bind: SocketAddr = if self.target.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket = UdpSocket::bind(bind)?;
        socket.set_read_timeout(Some(PROBE_TIMEOUT))?;
        socket.set_write_timeout(Some(PROBE_TIMEOUT))?;
        socket.connect(self.target)?;
        Ok(socket.local_addr()?.ip())
    }
}

impl Default for LocalAddress {
    fn default() -> Self { Self::new() }
}

impl StatusSource for LocalAddress {
    fn poll(&mut self) -> String<STATUS_TEXT_LEN> {
        let current = match self.lookup() {
            Ok(ip) if !ip.is_unspecified() => Some(ip),
            Ok(_) => None,
            Err(err) => {
                debug!("address lookup via {} failed: {err}", self.target);
                None
            }
        };
        if current != self.last {
            debug!("status address changed: {:?} -> {:?}", self.last, current);
            self.last = current;
        }

        match current {
            Some(ip) => {
                let mut text = String::new();
                if write!(text, "{ip}").is_err() {
                    return status_string(NO_ADDRESS);
                }
                text
            }
            None => status_string(NO_ADDRESS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_never_empty() {
        // Works with or without a network: either an address or the fallback
        let text = LocalAddress::new().poll();
        assert!(!text.is_empty());
        assert!(text.as_str() == NO_ADDRESS || text.parse::<IpAddr>().is_ok());
    }

    #[test]
    fn test_loopback_target() {
        let mut source = LocalAddress::with_target(SocketAddr::from(([127, 0, 0, 1], 9)));
        assert_eq!(source.poll().as_str(), "127.0.0.1");
    }
}
