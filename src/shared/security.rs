//! Usage: Security-sensitive helpers (token masking, log redaction, constant-time equality).

use serde_json::Value;
use subtle::ConstantTimeEq;

const TOKEN_MASK_PREFIX_LEN: usize = 6;
const TOKEN_MASK_SUFFIX_LEN: usize = 4;
const LOG_SNIPPET_MAX_CHARS: usize = 500;

pub(crate) fn mask_token(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let len = trimmed.len();
    if len <= TOKEN_MASK_PREFIX_LEN + TOKEN_MASK_SUFFIX_LEN || !trimmed.is_ascii() {
        return "*".repeat(len.min(8));
    }

    let prefix = &trimmed[..TOKEN_MASK_PREFIX_LEN];
    let suffix = &trimmed[len - TOKEN_MASK_SUFFIX_LEN..];
    format!("{prefix}...{suffix}")
}

pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

fn is_sensitive_key(key: &str) -> bool {
    let key_lc = key.trim().to_ascii_lowercase();
    key_lc.contains("token") || key_lc.contains("secret") || key_lc == "authorization"
}

fn redact_sensitive_json_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                if is_sensitive_key(key) {
                    if let Some(raw) = nested.as_str() {
                        *nested = Value::String(mask_token(raw));
                        continue;
                    }
                }
                redact_sensitive_json_fields(nested);
            }
        }
        Value::Array(items) => {
            for nested in items {
                redact_sensitive_json_fields(nested);
            }
        }
        _ => {}
    }
}

/// Bounded, token-masked rendering of a provider body for log lines.
pub(crate) fn log_snippet(body: &str) -> String {
    if let Ok(mut value) = serde_json::from_str::<Value>(body) {
        redact_sensitive_json_fields(&mut value);
        if let Ok(encoded) = serde_json::to_string(&value) {
            return encoded.chars().take(LOG_SNIPPET_MAX_CHARS).collect();
        }
    }
    body.chars().take(LOG_SNIPPET_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::{constant_time_eq, log_snippet, mask_token};

    #[test]
    fn mask_token_keeps_prefix_and_suffix() {
        let token = "act.abcdef1234567890";
        assert_eq!(mask_token(token), "act.ab...7890");
    }

    #[test]
    fn mask_token_short_values_redacts_fully() {
        assert_eq!(mask_token("abcd"), "****");
        assert_eq!(mask_token("   "), "");
    }

    #[test]
    fn constant_time_eq_matches_exact_bytes() {
        assert!(constant_time_eq(b"same", b"same"));
        assert!(!constant_time_eq(b"same", b"diff"));
        assert!(!constant_time_eq(b"same", b"samey"));
    }

    #[test]
    fn log_snippet_masks_token_fields() {
        let raw = r#"{
          "access_token": "act.1234567890abcdef",
          "nested": {"refresh_token": "rft.abcdefghijklmnop"},
          "error": "invalid_grant"
        }"#;
        let snippet = log_snippet(raw);
        assert!(!snippet.contains("act.1234567890abcdef"));
        assert!(!snippet.contains("rft.abcdefghijklmnop"));
        assert!(snippet.contains("invalid_grant"));
    }

    #[test]
    fn log_snippet_truncates_non_json_bodies() {
        let raw = "x".repeat(2000);
        assert_eq!(log_snippet(&raw).len(), 500);
    }
}
