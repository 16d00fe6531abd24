//! Rate-limit source key extraction from HTTP request headers.

use axum::http::HeaderMap;

/// Bucket shared by every caller that sends no client address headers.
pub const UNKNOWN_SOURCE: &str = "unknown";

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Derives the rate-limit source key for a request.
///
/// Priority:
/// 1. First address of the `X-Forwarded-For` chain
/// 2. `X-Real-IP`
/// 3. [`UNKNOWN_SOURCE`]
///
/// Empty or non-UTF-8 header values are skipped.
///
/// Both headers are client-controlled unless a trusted reverse proxy
/// overwrites them, so a direct caller can pick its own bucket.
pub fn source_key_from_headers(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|chain| chain.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    headers
        .get(X_REAL_IP)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or(UNKNOWN_SOURCE)
        .to_string()
}
