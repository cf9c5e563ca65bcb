use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccessClaims;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Registration;
use crate::domain::account::models::Role;
use crate::domain::account::ports::AccountAuthService;
use crate::domain::account::ports::AccountRepository;

/// Domain service implementation for account operations.
///
/// Orchestrates the registration validator, the credential hasher, the
/// token issuer, and the account repository.
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    authenticator: Arc<Authenticator>,
    token_valid_hours: i64,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Credential hashing and token issuance
    /// * `token_valid_hours` - Lifetime of issued bearer tokens
    pub fn new(repository: Arc<R>, authenticator: Arc<Authenticator>, token_valid_hours: i64) -> Self {
        Self {
            repository,
            authenticator,
            token_valid_hours,
        }
    }
}

/// Opaque, unpredictable one-time code proving control of a registration.
fn generate_activation_code() -> String {
    Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl<R> AccountAuthService for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, registration: Registration) -> Result<Account, AccountError> {
        let valid = registration.validate()?;

        let password_hash = self
            .authenticator
            .hash_password(&valid.password)
            .map_err(|e| AccountError::Password(e.to_string()))?;

        let account = Account {
            id: AccountId::new(),
            full_name: valid.full_name,
            username: valid.username,
            email: valid.email,
            password_hash,
            role: Role::User,
            is_active: false,
            activation_code: generate_activation_code(),
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;

        tracing::info!(account_id = %created.id, username = %created.username, "Account registered");

        Ok(created)
    }

    async fn login(&self, identifier: &str, password: &str) -> Result<String, AccountError> {
        // A missing account and an inactive account are indistinguishable
        // here: the repository only surfaces active matches.
        let account = self
            .repository
            .find_active_by_identifier(identifier)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let claims = AccessClaims::new(account.id, account.role, self.token_valid_hours);

        let result = self
            .authenticator
            .authenticate(password, &account.password_hash, &claims)
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                auth::AuthenticationError::PasswordError(err) => {
                    AccountError::Password(err.to_string())
                }
                auth::AuthenticationError::JwtError(err) => AccountError::Token(err.to_string()),
            })?;

        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok(result.access_token)
    }

    async fn activate(&self, code: &str) -> Result<Account, AccountError> {
        let account = self
            .repository
            .activate_by_code(code)
            .await?
            .ok_or_else(|| {
                AccountError::NotFound("no account matches the activation code".to_string())
            })?;

        tracing::info!(account_id = %account.id, "Account activated");

        Ok(account)
    }

    async fn identify(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.list_all().await
    }
}
