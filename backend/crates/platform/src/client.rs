//! Client identification utilities
//!
//! Common functions for identifying request sources via HTTP headers.
//! The forwarded-for claim is trusted as-is (first entry wins), matching a
//! deployment behind a single reverse proxy; there is no trust-boundary
//! validation, so a direct-exposed instance should rely on the peer address.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Maximum stored User-Agent length
pub const USER_AGENT_MAX_LENGTH: usize = 512;

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // Check X-Forwarded-For header (first IP in the list)
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}

/// Source address as a rate-limiter key
///
/// Falls back to `"unknown"` when no address is determinable, so such
/// requests still share one throttling bucket instead of escaping the
/// limiter.
pub fn source_address(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> String {
    extract_client_ip(headers, direct_ip)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Extract the User-Agent header, truncated for storage
///
/// Stored verbatim as an opaque audit field on submitted comments.
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|ua| ua.chars().take(USER_AGENT_MAX_LENGTH).collect())
}
