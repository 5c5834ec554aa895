use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};

use super::{ApiClient, ApiError};
use crate::model::UserProfile;
use crate::session::BearerToken;

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub email: String,
    #[serde(rename = "password_digest")]
    pub password: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_money: Decimal,
}

impl Debug for Registration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("total_money", &self.total_money)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize, Clone)]
pub struct Credentials {
    pub email: String,
    #[serde(rename = "password_digest")]
    pub password: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    token: BearerToken,
}

/// Who the Record Store thinks the current token belongs to.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

pub async fn register(client: &ApiClient, registration: &Registration) -> Result<BearerToken, ApiError> {
    log::info!("Requesting registration...");
    let response: TokenResponse = client.post("/users/register", registration).await?;
    log::info!("Requesting registration...done");
    Ok(response.token)
}

pub async fn login(client: &ApiClient, credentials: &Credentials) -> Result<BearerToken, ApiError> {
    log::info!("Requesting login...");
    let response: TokenResponse = client.post("/users/login", credentials).await?;
    log::info!("Requesting login...done");
    Ok(response.token)
}

/// Returns Ok(None) if there is no session or the Record Store doesn't accept it.
/// Without a token no request is made.
pub async fn verify(client: &ApiClient) -> Result<Option<Identity>, ApiError> {
    if !client.has_credentials() {
        log::info!("Not verifying session, no token");
        return Ok(None);
    }
    log::info!("Requesting session verification...");
    let response: serde_json::Value = match client.get("/users/verify").await {
        Ok(response) => response,
        Err(ApiError::Unauthorized) => {
            log::info!("Requesting session verification...rejected");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };
    let identity = match response {
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        response => Some(
            serde_json::from_value(response)
                .map_err(|err| ApiError::Parse(format!("Failed to parse identity: {err}")))?,
        ),
    };
    log::info!("Requesting session verification...done");
    Ok(identity)
}

pub async fn profile(client: &ApiClient) -> Result<UserProfile, ApiError> {
    log::info!("Requesting profile...");
    let profile = client.get("/users/profile").await?;
    log::info!("Requesting profile...done");
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn credentials_use_record_store_field_names() {
        let credentials = Credentials {
            email: "alice@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        assert_eq!(
            json!({"email": "alice@example.com", "password_digest": "hunter2"}),
            serde_json::to_value(&credentials).unwrap()
        );
        assert!(!format!("{credentials:?}").contains("hunter2"));

        let registration = Registration {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "hunter2".to_string(),
            total_money: Decimal::new(15050, 2),
        };
        assert_eq!(
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password_digest": "hunter2",
                "totalMoney": 150.5,
            }),
            serde_json::to_value(&registration).unwrap()
        );
        assert!(!format!("{registration:?}").contains("hunter2"));
    }

    #[test]
    fn identity_accepts_both_id_spellings() {
        let identity: Identity = serde_json::from_value(json!({"_id": "u1"})).unwrap();
        assert_eq!("u1", identity.id);
        let identity: Identity =
            serde_json::from_value(json!({"id": "u2", "username": "bob"})).unwrap();
        assert_eq!(Some("bob".to_string()), identity.username);
    }
}
