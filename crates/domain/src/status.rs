//! Reasons reported for failed HTTP statuses.

/// Returns the named reason for the status codes the service is known to use.
#[must_use]
pub const fn status_reason(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("Bad Request"),
        401 => Some("Unauthorized"),
        402 => Some("Payment Required"),
        403 => Some("Forbidden"),
        404 => Some("Not Found"),
        405 => Some("Method Not Allowed"),
        500 => Some("Internal Server Error"),
        501 => Some("Not Implemented"),
        502 => Some("Bad Gateway"),
        503 => Some("Service Unavailable"),
        504 => Some("Gateway Timeout"),
        _ => None,
    }
}

/// Human-readable reason for any failed status.
#[must_use]
pub fn describe_status(status: u16) -> String {
    status_reason(status).map_or_else(
        || format!("HTTP error with code {status}"),
        ToString::to_string,
    )
}

/// Returns true for statuses treated as failures (400 and above).
#[must_use]
pub const fn is_failure(status: u16) -> bool {
    status >= 400
}
