//! Local network address discovery
//!
//! Best-effort only: the resolved address is used for the printed status line
//! and the tray menu label so phones on the same network know where to point
//! their browser. Nothing depends on it being right, so every failure path
//! falls back instead of erroring.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

/// Determine the machine's outbound-facing LAN IPv4 address.
///
/// Connects a UDP socket towards a well-known public address to make the OS
/// pick the outbound interface; no packet is ever sent. If that fails (no
/// network, no route), falls back to scanning interfaces, and finally to
/// loopback.
pub fn local_ipv4() -> Ipv4Addr {
    if let Some(ip) = probe_outbound() {
        return ip;
    }
    if let Some(ip) = first_interface_ipv4() {
        return ip;
    }
    log::info!("No LAN address found, falling back to loopback");
    Ipv4Addr::LOCALHOST
}

/// Ask the routing table which local address would reach the internet
fn probe_outbound() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0)).ok()?;
    socket.connect(("8.8.8.8", 80)).ok()?;
    match socket.local_addr().ok()? {
        SocketAddr::V4(addr) => Some(*addr.ip()),
        SocketAddr::V6(_) => None,
    }
}

/// Pick the first non-loopback IPv4 interface address
fn first_interface_ipv4() -> Option<Ipv4Addr> {
    match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces.into_iter().find_map(|iface| {
            if iface.is_loopback() {
                return None;
            }
            match iface.addr.ip() {
                IpAddr::V4(ip) => Some(ip),
                IpAddr::V6(_) => None,
            }
        }),
        Err(e) => {
            log::warn!("Failed to enumerate network interfaces: {}", e);
            None
        }
    }
}
