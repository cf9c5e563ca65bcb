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
use crate::domain::account::models::Role;
use crate::domain::account::ports::AccountAuthService;
use crate::inbound::http::router::AppState;

pub async fn activate(
    State(state): State<AppState>,
    Json(body): Json<ActivationRequestBody>,
) -> Result<ApiSuccess<ActivationResponseData>, ApiError> {
    state
        .account_service
        .activate(&body.code)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActivationRequestBody {
    code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationResponseData {
    pub id: String,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for ActivationResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            full_name: account.full_name.as_str().to_string(),
            username: account.username.as_str().to_string(),
            email: account.email.as_str().to_string(),
            role: account.role,
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}
