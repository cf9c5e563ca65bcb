use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::Account;
use crate::domain::account::models::Registration;
use crate::domain::account::models::Role;
use crate::domain::account::ports::AccountAuthService;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .account_service
        .register(body.into_registration())
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestBody {
    full_name: String,
    username: String,
    email: String,
    password: String,
    confirm_password: String,
}

impl RegisterRequestBody {
    fn into_registration(self) -> Registration {
        Registration {
            full_name: self.full_name,
            username: self.username,
            email: self.email,
            password: self.password,
            confirm_password: self.confirm_password,
        }
    }
}

/// Created account, without the stored credential. The activation code is
/// returned to the caller: delivering it out of band is the mail
/// collaborator's job, which is outside this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponseData {
    pub id: String,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub activation_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for RegisterResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            full_name: account.full_name.as_str().to_string(),
            username: account.username.as_str().to_string(),
            email: account.email.as_str().to_string(),
            role: account.role,
            is_active: account.is_active,
            activation_code: account.activation_code.clone(),
            created_at: account.created_at,
        }
    }
}
