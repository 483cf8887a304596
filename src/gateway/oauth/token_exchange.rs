//! Usage: Token endpoint helpers (form bodies + response parsing for both grants).

use super::provider::{OAuthTokenSet, ProviderError, ProviderResult};
use super::provider::{TokenExchangeRequest, TokenRefreshRequest};
use serde_json::Value;

pub(crate) fn authorization_code_form(req: &TokenExchangeRequest) -> Vec<(&'static str, String)> {
    vec![
        ("client_key", req.client_key.trim().to_string()),
        ("client_secret", req.client_secret.trim().to_string()),
        ("code", req.code.trim().to_string()),
        ("grant_type", "authorization_code".to_string()),
        ("redirect_uri", req.redirect_uri.trim().to_string()),
    ]
}

pub(crate) fn refresh_token_form(req: &TokenRefreshRequest) -> Vec<(&'static str, String)> {
    vec![
        ("client_key", req.client_key.trim().to_string()),
        ("client_secret", req.client_secret.trim().to_string()),
        ("grant_type", "refresh_token".to_string()),
        ("refresh_token", req.refresh_token.trim().to_string()),
    ]
}

/// Interpret a token endpoint body. The provider may report errors with a 2xx status,
/// so success is decided by the presence of `access_token`, not by the status code.
pub(crate) fn parse_token_response(body: &str, now_unix: i64) -> ProviderResult<OAuthTokenSet> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        ProviderError::Transport(format!("token response json invalid: {e}"))
    })?;

    let Some(access_token) = non_empty_str(&value, "access_token") else {
        let (code, message) = parse_oauth_error_details(&value);
        tracing::warn!(
            error_code = code.as_deref().unwrap_or("-"),
            error_message = message.as_deref().unwrap_or("-"),
            body = %crate::shared::security::log_snippet(body),
            "token endpoint response has no access_token"
        );
        return Err(ProviderError::Rejected {
            body: body.to_string(),
        });
    };

    Ok(OAuthTokenSet {
        access_token,
        refresh_token: non_empty_str(&value, "refresh_token"),
        expires_at: expiry_from(&value, "expires_in", now_unix),
        refresh_expires_at: expiry_from(&value, "refresh_expires_in", now_unix),
        open_id: non_empty_str(&value, "open_id"),
        scope: non_empty_str(&value, "scope"),
    })
}

fn non_empty_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn expiry_from(value: &Value, key: &str, now_unix: i64) -> Option<i64> {
    let secs = value.get(key).and_then(parse_i64_lossy)?;
    if secs <= 0 {
        None
    } else {
        Some(now_unix.saturating_add(secs))
    }
}

pub(crate) fn parse_i64_lossy(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Extract `(code, message)` from the OAuth-standard or nested `error` shapes.
fn parse_oauth_error_details(value: &Value) -> (Option<String>, Option<String>) {
    let mut code = non_empty_str(value, "code");
    let mut message = non_empty_str(value, "error_description");

    if let Some(error_value) = value.get("error") {
        if let Some(err_str) = error_value.as_str() {
            if code.is_none() {
                code = Some(err_str.trim().to_string());
            }
        } else if error_value.is_object() {
            if code.is_none() {
                code = non_empty_str(error_value, "code");
            }
            if message.is_none() {
                message = non_empty_str(error_value, "message");
            }
        }
    }

    (code, message)
}
