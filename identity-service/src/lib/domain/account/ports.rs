use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Registration;

/// Port for account authentication service operations.
#[async_trait]
pub trait AccountAuthService: Send + Sync + 'static {
    /// Register a new, inactive account.
    ///
    /// Validates the registration input, hashes the password, and
    /// generates a fresh activation code.
    ///
    /// # Arguments
    /// * `registration` - Raw registration fields
    ///
    /// # Returns
    /// Created account (inactive, activation code set)
    ///
    /// # Errors
    /// * `Validation` - One or more registration rules violated
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, registration: Registration) -> Result<Account, AccountError>;

    /// Authenticate an active account and issue a bearer token.
    ///
    /// The identifier matches either username or email. A missing
    /// account, an inactive account, and a wrong password all fail with
    /// the same `InvalidCredentials` error.
    ///
    /// # Arguments
    /// * `identifier` - Username or email
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Signed bearer token carrying the account's id and role
    ///
    /// # Errors
    /// * `InvalidCredentials` - No active account matches, or password wrong
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, identifier: &str, password: &str) -> Result<String, AccountError>;

    /// Activate the account whose activation code matches.
    ///
    /// Idempotent for a valid code: the code is not consumed, so
    /// repeating the call succeeds and leaves the account active.
    ///
    /// # Arguments
    /// * `code` - Activation code from registration
    ///
    /// # Returns
    /// The activated account
    ///
    /// # Errors
    /// * `NotFound` - No account matches the code
    /// * `DatabaseError` - Store operation failed
    async fn activate(&self, code: &str) -> Result<Account, AccountError>;

    /// Load the current account for a verified identity claim.
    ///
    /// # Arguments
    /// * `id` - Account ID asserted by the claim
    ///
    /// # Returns
    /// Current account state
    ///
    /// # Errors
    /// * `NotFound` - Account no longer exists
    /// * `DatabaseError` - Store operation failed
    async fn identify(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Retrieve all accounts, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// Uniqueness of username and email is enforced here (unique
/// constraints), not by the service: concurrent duplicate registrations
/// must produce exactly one winner.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve the active account whose username or email matches.
    ///
    /// Inactive accounts are invisible to this lookup.
    ///
    /// # Returns
    /// Optional account (None if no active account matches)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_active_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, AccountError>;

    /// Atomically activate the account whose activation code matches.
    ///
    /// # Returns
    /// The updated account, or None if no code matched
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn activate_by_code(&self, code: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve all accounts, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;
}
