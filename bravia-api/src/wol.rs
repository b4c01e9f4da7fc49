//! Wake-on-LAN magic packets
//!
//! Powering the set on from standby through the network card is the
//! alternative to the `setPowerStatus` path and needs only the MAC address.

use std::net::UdpSocket;

use crate::error::{ApiError, Result};

/// Destination of the magic packet
const BROADCAST_ADDR: &str = "255.255.255.255:9";

/// Parse `aa:bb:cc:dd:ee:ff` (or `-` separated) into six bytes
pub fn parse_mac(mac: &str) -> Result<[u8; 6]> {
    let parts: Vec<&str> = mac.trim().split([':', '-']).collect();
    if parts.len() != 6 {
        return Err(ApiError::InvalidParameter(format!(
            "MAC address '{}' must have six octets",
            mac
        )));
    }

    let mut bytes = [0u8; 6];
    for (byte, part) in bytes.iter_mut().zip(&parts) {
        *byte = u8::from_str_radix(part, 16).map_err(|_| {
            ApiError::InvalidParameter(format!("Invalid octet '{}' in MAC address '{}'", part, mac))
        })?;
    }
    Ok(bytes)
}

/// Six `0xFF` bytes followed by the MAC address repeated sixteen times
pub fn magic_packet(mac: [u8; 6]) -> [u8; 102] {
    let mut packet = [0xFFu8; 102];
    for chunk in packet[6..].chunks_exact_mut(6) {
        chunk.copy_from_slice(&mac);
    }
    packet
}

/// Broadcast a magic packet for `mac`
pub fn wake(mac: &str) -> Result<()> {
    let packet = magic_packet(parse_mac(mac)?);

    let socket = UdpSocket::bind("0.0.0.0:0")
        .map_err(|e| ApiError::WakeOnLan(format!("Failed to bind UDP socket: {}", e)))?;
    socket
        .set_broadcast(true)
        .map_err(|e| ApiError::WakeOnLan(format!("Failed to enable broadcast: {}", e)))?;
    socket
        .send_to(&packet, BROADCAST_ADDR)
        .map_err(|e| ApiError::WakeOnLan(format!("Failed to send magic packet: {}", e)))?;

    tracing::debug!(mac = %mac, "sent Wake-on-LAN packet");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mac() {
        assert_eq!(
            parse_mac("fc:f1:52:0a:bc:01").unwrap(),
            [0xfc, 0xf1, 0x52, 0x0a, 0xbc, 0x01]
        );
        assert_eq!(
            parse_mac("FC-F1-52-0A-BC-01").unwrap(),
            [0xfc, 0xf1, 0x52, 0x0a, 0xbc, 0x01]
        );
    }

    #[test]
    fn test_parse_mac_rejects_garbage() {
        assert!(parse_mac("Android").is_err());
        assert!(parse_mac("fc:f1:52:0a:bc").is_err());
        assert!(parse_mac("fc:f1:52:0a:bc:zz").is_err());
    }

    #[test]
    fn test_magic_packet_layout() {
        let mac = [1, 2, 3, 4, 5, 6];
        let packet = magic_packet(mac);

        assert_eq!(&packet[..6], &[0xFF; 6]);
        for repetition in packet[6..].chunks(6) {
            assert_eq!(repetition, &mac);
        }
    }
}
