use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};

/// The signed credential handed out by the Record Store on register and login.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new(token: String) -> BearerToken {
        BearerToken { token }
    }

    pub fn get(&self) -> &str {
        &self.token
    }

    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Decodes the claims in the token's payload. The signature is not checked,
    /// only the Record Store can do that.
    pub fn claims(&self) -> Result<TokenClaims> {
        let payload = self
            .token
            .split('.')
            .nth(1)
            .ok_or_else(|| anyhow!("Token is not a JWT"))?;
        // Some encoders pad anyway
        let payload = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .context("Token payload is not base64url")?;
        serde_json::from_slice(&payload).context("Token payload is not valid JSON")
    }
}

impl Debug for BearerToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken(*****)")
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp
            .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expires_at| expires_at <= now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn jwt(claims: serde_json::Value) -> BearerToken {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        BearerToken::new(format!("{header}.{payload}.signature"))
    }

    #[test]
    fn decodes_claims() {
        let token = jwt(json!({"id": "u1", "username": "alice", "exp": 1_700_000_000}));
        let claims = token.claims().unwrap();
        assert_eq!("u1", claims.id);
        assert_eq!(Some("alice".to_string()), claims.username);
        assert_eq!(None, claims.email);
        assert_eq!(
            Some(Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap()),
            claims.expires_at()
        );
        assert!(claims.is_expired(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert!(!claims.is_expired(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn accepts_mongo_style_id() {
        let token = jwt(json!({"_id": "u2"}));
        assert_eq!("u2", token.claims().unwrap().id);
    }

    #[test]
    fn rejects_non_jwt() {
        assert!(BearerToken::new("opaque".to_string()).claims().is_err());
        assert!(BearerToken::new("a.!!!.c".to_string()).claims().is_err());
    }

    #[test]
    fn debug_does_not_leak_token() {
        let token = BearerToken::new("secret".to_string());
        assert_eq!("BearerToken(*****)", format!("{token:?}"));
        assert_eq!("Bearer secret", token.header_value());
    }
}
