//! Binary to text conversions.
//!
//! Every function is total: malformed input yields `Err` with a short
//! description, never a truncated or wrapped result.

use base64::{engine::general_purpose, Engine as _};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

pub fn base64url_encode(bytes: &[u8]) -> Result<String, String> {
    Ok(general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

pub fn base64url_decode(text: &str) -> Result<Vec<u8>, String> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(text.trim_end_matches('='))
        .map_err(|e| format!("invalid base64url: {}", e))
}

pub fn hex_encode(bytes: &[u8]) -> Result<String, String> {
    Ok(hex::encode_upper(bytes))
}

pub fn hex_decode(text: &str) -> Result<Vec<u8>, String> {
    hex::decode(text).map_err(|e| format!("invalid hex: {}", e))
}

fn ipv4_octets(bytes: &[u8]) -> Result<[u8; 4], String> {
    <[u8; 4]>::try_from(bytes).map_err(|_| format!("IPv4 address must be 4 bytes, got {}", bytes.len()))
}

fn ipv6_octets(bytes: &[u8]) -> Result<[u8; 16], String> {
    <[u8; 16]>::try_from(bytes).map_err(|_| format!("IPv6 address must be 16 bytes, got {}", bytes.len()))
}

/// Address version is chosen by byte length.
pub fn ip_encode(bytes: &[u8]) -> Result<String, String> {
    match bytes.len() {
        4 => ipv4_encode(bytes),
        16 => ipv6_encode(bytes),
        n => Err(format!("IP address must be 4 or 16 bytes, got {}", n)),
    }
}

/// Address version is chosen by separator: `:` means IPv6.
pub fn ip_decode(text: &str) -> Result<Vec<u8>, String> {
    if text.contains(':') {
        ipv6_decode(text)
    } else {
        ipv4_decode(text)
    }
}

pub fn ipv4_encode(bytes: &[u8]) -> Result<String, String> {
    Ok(Ipv4Addr::from(ipv4_octets(bytes)?).to_string())
}

pub fn ipv4_decode(text: &str) -> Result<Vec<u8>, String> {
    text.parse::<Ipv4Addr>()
        .map(|a| a.octets().to_vec())
        .map_err(|e| format!("invalid IPv4 address {:?}: {}", text, e))
}

pub fn ipv6_encode(bytes: &[u8]) -> Result<String, String> {
    Ok(Ipv6Addr::from(ipv6_octets(bytes)?).to_string())
}

pub fn ipv6_decode(text: &str) -> Result<Vec<u8>, String> {
    text.parse::<Ipv6Addr>()
        .map(|a| a.octets().to_vec())
        .map_err(|e| format!("invalid IPv6 address {:?}: {}", text, e))
}

fn check_prefix(prefix: i64, max: i64) -> Result<(), String> {
    if (0..=max).contains(&prefix) {
        Ok(())
    } else {
        Err(format!("prefix length {} outside 0..={}", prefix, max))
    }
}

fn split_cidr(text: &str, max: i64) -> Result<(&str, i64), String> {
    let (addr, prefix) = text
        .split_once('/')
        .ok_or_else(|| format!("missing prefix length in {:?}", text))?;
    let prefix = prefix
        .parse::<i64>()
        .map_err(|_| format!("invalid prefix length in {:?}", text))?;
    check_prefix(prefix, max)?;
    Ok((addr, prefix))
}

pub fn ipv4_net_encode(bytes: &[u8], prefix: i64) -> Result<String, String> {
    check_prefix(prefix, 32)?;
    Ok(format!("{}/{}", ipv4_encode(bytes)?, prefix))
}

pub fn ipv4_net_decode(text: &str) -> Result<(Vec<u8>, i64), String> {
    let (addr, prefix) = split_cidr(text, 32)?;
    Ok((ipv4_decode(addr)?, prefix))
}

pub fn ipv6_net_encode(bytes: &[u8], prefix: i64) -> Result<String, String> {
    check_prefix(prefix, 128)?;
    Ok(format!("{}/{}", ipv6_encode(bytes)?, prefix))
}

pub fn ipv6_net_decode(text: &str) -> Result<(Vec<u8>, i64), String> {
    let (addr, prefix) = split_cidr(text, 128)?;
    match addr.parse::<IpAddr>() {
        Ok(IpAddr::V6(a)) => Ok((a.octets().to_vec(), prefix)),
        _ => Err(format!("invalid IPv6 network {:?}", text)),
    }
}
