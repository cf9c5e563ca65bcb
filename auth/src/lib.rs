//! Authentication infrastructure library
//!
//! Provides the cryptographic building blocks for the identity service:
//! - Password hashing (Argon2id with per-hash salts)
//! - JWT token signing and verification
//! - An authenticator coordinating both for login flows
//!
//! The library carries no domain knowledge: token payloads are generic,
//! and each service defines its own claims type.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Complete Login Flow
//! ```
//! use auth::Authenticator;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Claims { sub: String, exp: i64 }
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Registration: hash the password for storage
//! let hash = auth.hash_password("Password1").unwrap();
//!
//! // Login: verify the password and sign a token
//! let claims = Claims { sub: "account123".into(), exp: 4102444800 };
//! let result = auth.authenticate("Password1", &hash, &claims).unwrap();
//!
//! // Later requests: verify the presented token
//! let decoded: Claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.sub, "account123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
