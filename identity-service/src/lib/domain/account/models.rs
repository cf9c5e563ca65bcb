use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::account::errors::AccountIdError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::FullNameError;
use crate::domain::account::errors::PasswordRuleError;
use crate::domain::account::errors::RegistrationError;
use crate::domain::account::errors::RegistrationViolation;
use crate::domain::account::errors::RoleError;
use crate::domain::account::errors::UsernameError;

/// Account aggregate entity.
///
/// Created inactive by registration; flipped active only by a matching
/// activation code. The stored credential is an Argon2 PHC string, never
/// the plaintext.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub full_name: FullName,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub activation_code: String,
    pub created_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    /// Create a new full name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    pub fn new(full_name: String) -> Result<Self, FullNameError> {
        if full_name.trim().is_empty() {
            Err(FullNameError::Empty)
        } else {
            Ok(Self(full_name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Create a new username.
    ///
    /// # Errors
    /// * `Empty` - Username is empty or whitespace only
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            Err(UsernameError::Empty)
        } else {
            Ok(Self(username))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Closed role set shared by accounts, token claims, and the access gate.
///
/// Serialized as lowercase strings (`"admin"`, `"user"`), matching the
/// stored representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// Raw registration input, as submitted by the caller.
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration input that passed every rule.
#[derive(Debug)]
pub struct ValidRegistration {
    pub full_name: FullName,
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

const PASSWORD_MIN_LENGTH: usize = 6;

impl Registration {
    /// Validate all registration rules at once.
    ///
    /// Collects every violated rule rather than stopping at the first, so
    /// the resulting error enumerates the whole form.
    ///
    /// # Errors
    /// * `RegistrationError` - One or more rules violated
    pub fn validate(self) -> Result<ValidRegistration, RegistrationError> {
        let mut violations = Vec::new();

        let full_name = FullName::new(self.full_name)
            .map_err(|e| violations.push(RegistrationViolation::from(e)))
            .ok();
        let username = Username::new(self.username)
            .map_err(|e| violations.push(RegistrationViolation::from(e)))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| violations.push(RegistrationViolation::from(e)))
            .ok();

        if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            violations.push(RegistrationViolation::Password(
                PasswordRuleError::TooShort {
                    min: PASSWORD_MIN_LENGTH,
                },
            ));
        }
        if !self.password.chars().any(|c| c.is_ascii_uppercase()) {
            violations.push(RegistrationViolation::Password(
                PasswordRuleError::MissingUppercase,
            ));
        }
        if !self.password.chars().any(|c| c.is_ascii_digit()) {
            violations.push(RegistrationViolation::Password(
                PasswordRuleError::MissingDigit,
            ));
        }
        if self.confirm_password != self.password {
            violations.push(RegistrationViolation::ConfirmPassword(
                PasswordRuleError::Mismatch,
            ));
        }

        match (full_name, username, email) {
            (Some(full_name), Some(username), Some(email)) if violations.is_empty() => {
                Ok(ValidRegistration {
                    full_name,
                    username,
                    email,
                    password: self.password,
                })
            }
            _ => Err(RegistrationError { violations }),
        }
    }
}

/// Identity claim embedded in issued bearer tokens.
///
/// Derived from an authenticated account at login; never persisted. The
/// server keeps no session state, so signature and expiry are the only
/// validity checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Account identifier
    pub sub: String,
    /// Account role at issuance
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for an authenticated account.
    ///
    /// # Arguments
    /// * `account_id` - Account the token asserts
    /// * `role` - Role at issuance
    /// * `valid_hours` - Hours until the token expires
    pub fn new(account_id: AccountId, role: Role, valid_hours: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::hours(valid_hours);

        Self {
            sub: account_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Parse the subject back into a typed account ID.
    ///
    /// # Errors
    /// * `InvalidFormat` - Subject is not a valid UUID
    pub fn account_id(&self) -> Result<AccountId, AccountIdError> {
        AccountId::from_string(&self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_registration() -> Registration {
        Registration {
            full_name: "Ada Lovelace".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "Secret1".to_string(),
            confirm_password: "Secret1".to_string(),
        }
    }

    #[test]
    fn test_validate_success() {
        let valid = valid_registration().validate().expect("should validate");

        assert_eq!(valid.full_name.as_str(), "Ada Lovelace");
        assert_eq!(valid.username.as_str(), "ada");
        assert_eq!(valid.email.as_str(), "ada@example.com");
        assert_eq!(valid.password, "Secret1");
    }

    #[test]
    fn test_validate_empty_full_name() {
        let mut registration = valid_registration();
        registration.full_name = "  ".to_string();

        let err = registration.validate().unwrap_err();
        assert_eq!(
            err.violations,
            vec![RegistrationViolation::FullName(FullNameError::Empty)]
        );
    }

    #[test]
    fn test_validate_empty_username() {
        let mut registration = valid_registration();
        registration.username = String::new();

        let err = registration.validate().unwrap_err();
        assert_eq!(
            err.violations,
            vec![RegistrationViolation::Username(UsernameError::Empty)]
        );
    }

    #[test]
    fn test_validate_invalid_email() {
        let mut registration = valid_registration();
        registration.email = "not-an-email".to_string();

        let err = registration.validate().unwrap_err();
        assert!(matches!(
            err.violations.as_slice(),
            [RegistrationViolation::Email(_)]
        ));
    }

    #[test]
    fn test_validate_short_password() {
        let mut registration = valid_registration();
        registration.password = "Ab1".to_string();
        registration.confirm_password = "Ab1".to_string();

        let err = registration.validate().unwrap_err();
        assert_eq!(
            err.violations,
            vec![RegistrationViolation::Password(
                PasswordRuleError::TooShort { min: 6 }
            )]
        );
    }

    #[test]
    fn test_validate_password_missing_uppercase() {
        let mut registration = valid_registration();
        registration.password = "secret1".to_string();
        registration.confirm_password = "secret1".to_string();

        let err = registration.validate().unwrap_err();
        assert_eq!(
            err.violations,
            vec![RegistrationViolation::Password(
                PasswordRuleError::MissingUppercase
            )]
        );
    }

    #[test]
    fn test_validate_password_missing_digit() {
        let mut registration = valid_registration();
        registration.password = "Secrets".to_string();
        registration.confirm_password = "Secrets".to_string();

        let err = registration.validate().unwrap_err();
        assert_eq!(
            err.violations,
            vec![RegistrationViolation::Password(
                PasswordRuleError::MissingDigit
            )]
        );
    }

    #[test]
    fn test_validate_password_mismatch() {
        let mut registration = valid_registration();
        registration.confirm_password = "Secret2".to_string();

        let err = registration.validate().unwrap_err();
        assert_eq!(
            err.violations,
            vec![RegistrationViolation::ConfirmPassword(
                PasswordRuleError::Mismatch
            )]
        );
        assert!(err.to_string().contains("Passwords must match"));
    }

    #[test]
    fn test_validate_collects_all_violations() {
        let registration = Registration {
            full_name: String::new(),
            username: String::new(),
            email: "nope".to_string(),
            password: "abc".to_string(),
            confirm_password: "different".to_string(),
        };

        let err = registration.validate().unwrap_err();
        // empty name, empty username, bad email, short password, no
        // uppercase, no digit, mismatch
        assert_eq!(err.violations.len(), 7);
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!(Role::Admin.to_string(), "admin");
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_access_claims_expiry_window() {
        let claims = AccessClaims::new(AccountId::new(), Role::User, 24);

        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(claims.role, Role::User);
        assert!(claims.account_id().is_ok());
    }
}
