//! Access log parsing.
//!
//! Converts a line-delimited JSON access log entry into a typed
//! [`RequestRecord`], filtering out health-check traffic before it can reach
//! the request window or the failover detector.

use serde::Deserialize;
use serde_json::Value;

/// Request path markers identifying internal health probes
const HEALTH_CHECK_MARKERS: [&str; 2] = ["nginx-health", "healthz"];

/// One request outcome extracted from an access log line.
///
/// Derived once per line and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    /// Upstream pool that served the request (may be empty)
    pub pool: String,
    /// HTTP status returned to the client (0 when absent)
    pub status: u16,
    /// True iff any upstream attempt returned a 5xx status
    pub is_error: bool,
    /// Raw request timestamp from the log line
    pub timestamp: String,
}

/// Internal structure for JSON log parsing
#[derive(Debug, Deserialize)]
struct RawAccessEntry {
    #[serde(default)]
    pool: String,
    /// Number or string depending on the nginx log_format
    #[serde(default)]
    status: Value,
    #[serde(default)]
    request: String,
    /// Single code, or comma-separated codes when the proxy retried upstream
    #[serde(default)]
    upstream_status: Value,
    #[serde(default)]
    time: String,
}

impl RequestRecord {
    /// Parse a JSON access log line into a record.
    ///
    /// Returns `None` for malformed lines and for health-check requests;
    /// neither may enter the request window.
    pub fn parse(line: &str) -> Option<RequestRecord> {
        let raw: RawAccessEntry = serde_json::from_str(line).ok()?;

        if is_health_check(&raw.request) {
            return None;
        }

        let upstream_status = value_as_text(&raw.upstream_status);

        Some(RequestRecord {
            pool: raw.pool,
            status: value_as_text(&raw.status).parse().unwrap_or(0),
            is_error: has_server_error(&upstream_status),
            timestamp: raw.time,
        })
    }
}

/// Check whether a request line belongs to an internal health probe.
fn is_health_check(request: &str) -> bool {
    HEALTH_CHECK_MARKERS
        .iter()
        .any(|marker| request.contains(marker))
}

/// Coerce a JSON field that may arrive as a number or a string.
fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Scan a possibly comma-separated upstream status list for a 5xx code.
///
/// Non-numeric and empty entries are ignored, never treated as errors.
fn has_server_error(upstream_status: &str) -> bool {
    upstream_status
        .split(',')
        .filter_map(|code| code.trim().parse::<u16>().ok())
        .any(|code| code >= 500)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_valid_access_line() {
        // Arrange
        let line = r#"{"time":"2025-01-15T10:30:00+00:00","request":"GET /api/orders HTTP/1.1","status":"200","upstream_status":"200","pool":"blue"}"#;

        // Act
        let record = RequestRecord::parse(line);

        // Assert
        assert!(record.is_some());
        let record = record.unwrap();
        assert_eq!(record.pool, "blue");
        assert_eq!(record.status, 200);
        assert!(!record.is_error);
        assert_eq!(record.timestamp, "2025-01-15T10:30:00+00:00");
    }

    #[test]
    fn should_return_none_for_invalid_json() {
        // Arrange
        let line = "127.0.0.1 - - [15/Jan/2025:10:30:00 +0000] \"GET / HTTP/1.1\" 200 612";

        // Act
        let record = RequestRecord::parse(line);

        // Assert
        assert!(record.is_none());
    }

    #[test]
    fn should_default_missing_fields() {
        // Arrange
        let line = "{}";

        // Act
        let record = RequestRecord::parse(line).expect("Failed to parse");

        // Assert
        assert_eq!(record.pool, "");
        assert_eq!(record.status, 0);
        assert!(!record.is_error);
        assert_eq!(record.timestamp, "");
    }

    #[test]
    fn should_accept_numeric_status_fields() {
        // Arrange
        let line = r#"{"pool":"green","status":502,"upstream_status":502,"request":"GET /api/orders HTTP/1.1"}"#;

        // Act
        let record = RequestRecord::parse(line).expect("Failed to parse");

        // Assert
        assert_eq!(record.status, 502);
        assert!(record.is_error);
    }

    #[test]
    fn should_filter_nginx_health_requests() {
        // Arrange
        let line = r#"{"pool":"blue","status":"200","upstream_status":"200","request":"GET /nginx-health HTTP/1.1"}"#;

        // Act
        let record = RequestRecord::parse(line);

        // Assert
        assert!(record.is_none());
    }

    #[test]
    fn should_filter_healthz_requests() {
        // Arrange
        let line = r#"{"pool":"blue","status":"500","upstream_status":"500","request":"GET /healthz HTTP/1.1"}"#;

        // Act - even a failing health check stays out of the window
        let record = RequestRecord::parse(line);

        // Assert
        assert!(record.is_none());
    }

    #[test]
    fn should_flag_single_upstream_server_error() {
        // Act & Assert
        assert!(has_server_error("500"));
        assert!(has_server_error("503"));
        assert!(!has_server_error("200"));
    }

    #[test]
    fn should_flag_retried_upstream_with_server_error() {
        // Arrange - proxy retried on the other pool after a 500
        let line = r#"{"pool":"green","status":"200","upstream_status":"500, 200","request":"GET /api/orders HTTP/1.1"}"#;

        // Act
        let record = RequestRecord::parse(line).expect("Failed to parse");

        // Assert
        assert!(record.is_error);
    }

    #[test]
    fn should_not_flag_upstream_client_errors() {
        // Act & Assert
        assert!(!has_server_error("404"));
        assert!(!has_server_error("200, 404"));
        assert!(!has_server_error("499"));
    }

    #[test]
    fn should_ignore_non_numeric_upstream_entries() {
        // Act & Assert
        assert!(!has_server_error("-"));
        assert!(!has_server_error("-, timeout"));
        assert!(has_server_error("-, 502"));
        assert!(!has_server_error(""));
    }

    #[test]
    fn should_detect_health_check_markers_anywhere_in_request() {
        // Act & Assert
        assert!(is_health_check("GET /nginx-health HTTP/1.1"));
        assert!(is_health_check("GET /internal/healthz?deep=1 HTTP/1.1"));
        assert!(!is_health_check("GET /api/health-insurance HTTP/1.1"));
        assert!(!is_health_check(""));
    }

    #[test]
    fn should_coerce_null_fields_to_empty_text() {
        // Arrange
        let line = r#"{"pool":"blue","status":null,"upstream_status":null,"request":"GET / HTTP/1.1"}"#;

        // Act
        let record = RequestRecord::parse(line).expect("Failed to parse");

        // Assert
        assert_eq!(record.status, 0);
        assert!(!record.is_error);
    }
}
