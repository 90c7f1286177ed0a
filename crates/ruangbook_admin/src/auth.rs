// --- File: crates/ruangbook_admin/src/auth.rs ---
//! Dashboard accounts: password hashing, registration, login and session tokens.

use base64::{engine::general_purpose::STANDARD_NO_PAD as base64_engine, Engine};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use ruangbook_common::models::{AdminUser, UserRole};
use ruangbook_common::services::{AdminUserStore, BoxedError};
use ruangbook_common::{FieldError, RuangbookError};
use ruangbook_config::AdminConfig;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use thiserror::Error;
use tracing::{debug, info, warn};

const HASH_SCHEME: &str = "pbkdf2-sha256";
const PBKDF2_ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const CREDENTIAL_LEN: usize = digest::SHA256_OUTPUT_LEN;
const PASSWORD_MIN: usize = 6;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Data akun tidak valid")]
    Validation(Vec<FieldError>),
    #[error("Email sudah terdaftar")]
    EmailTaken,
    #[error("Email atau password salah")]
    InvalidCredentials,
    #[error("Silakan login terlebih dahulu")]
    MissingToken,
    #[error("Sesi tidak valid atau sudah berakhir")]
    InvalidToken,
    #[error("Akun ini tidak memiliki akses admin")]
    Forbidden,
    #[error("Auth configuration error: {0}")]
    Config(String),
    #[error("Password hashing failed")]
    Hashing,
    #[error("Account store error: {0}")]
    Store(#[from] BoxedError),
}

impl From<AuthError> for RuangbookError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(fields) => RuangbookError::FieldValidation(fields),
            AuthError::EmailTaken => RuangbookError::ConflictError(err.to_string()),
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
                RuangbookError::AuthError(err.to_string())
            }
            AuthError::Forbidden => RuangbookError::ForbiddenError(err.to_string()),
            AuthError::Config(msg) => RuangbookError::ConfigError(msg),
            AuthError::Hashing => RuangbookError::InternalError(err.to_string()),
            AuthError::Store(e) => RuangbookError::DatabaseError(e.to_string()),
        }
    }
}

// --- Data Structures ---

#[derive(Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct CredentialsRequest {
    #[cfg_attr(feature = "openapi", schema(example = "admin@kantor.co.id"))]
    pub email: String,
    pub password: String,
}

/// JWT payload.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Identity of a signed-in caller, available to handlers behind the auth middleware.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<AdminUser> for AccountResponse {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: AccountResponse,
}

// --- Passwords ---

/// Hashes `password` with a fresh random salt. Output is `pbkdf2-sha256$<iterations>$<salt>$<hash>`.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let iterations = NonZeroU32::new(PBKDF2_ITERATIONS).ok_or(AuthError::Hashing)?;
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| AuthError::Hashing)?;

    let mut credential = [0u8; CREDENTIAL_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        &salt,
        password.as_bytes(),
        &mut credential,
    );

    Ok(format!(
        "{}${}${}${}",
        HASH_SCHEME,
        iterations,
        base64_engine.encode(salt),
        base64_engine.encode(credential)
    ))
}

/// Constant-time check of `password` against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    if scheme != HASH_SCHEME {
        return false;
    }
    let Some(iterations) = iterations.parse::<u32>().ok().and_then(NonZeroU32::new) else {
        return false;
    };
    let (Ok(salt), Ok(hash)) = (base64_engine.decode(salt), base64_engine.decode(hash)) else {
        return false;
    };

    pbkdf2::verify(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        &salt,
        password.as_bytes(),
        &hash,
    )
    .is_ok()
}

// --- Validation ---

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Returns the normalized email when both fields are acceptable.
pub fn validate_credentials(request: &CredentialsRequest) -> Result<String, Vec<FieldError>> {
    let mut errors = Vec::new();
    let email = normalize_email(&request.email);
    if !is_valid_email(&email) {
        errors.push(FieldError::new("email", "Email tidak valid"));
    }
    if request.password.chars().count() < PASSWORD_MIN {
        errors.push(FieldError::new("password", "Password minimal 6 karakter"));
    }
    if errors.is_empty() {
        Ok(email)
    } else {
        Err(errors)
    }
}

/// Role granted at registration. Only emails listed in `bootstrap_admins` become admins.
pub fn role_for(config: &AdminConfig, email: &str) -> UserRole {
    let listed = config
        .bootstrap_admins
        .iter()
        .any(|admin| normalize_email(admin) == email);
    if listed {
        UserRole::Admin
    } else {
        UserRole::User
    }
}

// --- Tokens ---

fn signing_secret(config: &AdminConfig) -> Result<&[u8], AuthError> {
    if config.jwt_secret.is_empty() {
        return Err(AuthError::Config(
            "admin.jwt_secret is not configured".to_string(),
        ));
    }
    Ok(config.jwt_secret.as_bytes())
}

/// Signs an HS256 session token for `user`, valid for `token_ttl_minutes` from `now`.
pub fn issue_token(
    config: &AdminConfig,
    user: &AdminUser,
    now: DateTime<Utc>,
) -> Result<(String, DateTime<Utc>), AuthError> {
    let secret = signing_secret(config)?;
    let expires_at = now + Duration::minutes(config.token_ttl_minutes);
    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: user.role,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Config(format!("Failed to sign token: {}", e)))?;
    Ok((token, expires_at))
}

/// Checks signature and expiry of `token`. Expiry is judged against `now`, not the system clock.
pub fn verify_token(
    config: &AdminConfig,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Session, AuthError> {
    let secret = signing_secret(config)?;
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation).map_err(
        |e| {
            debug!("Rejected session token: {}", e);
            AuthError::InvalidToken
        },
    )?;
    let claims = data.claims;
    if claims.exp <= now.timestamp() {
        return Err(AuthError::InvalidToken);
    }
    let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(AuthError::InvalidToken)?;

    Ok(Session {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role,
        expires_at,
    })
}

// --- Account operations ---

pub async fn register<S>(
    store: &S,
    config: &AdminConfig,
    request: &CredentialsRequest,
) -> Result<AdminUser, AuthError>
where
    S: AdminUserStore<Error = BoxedError> + ?Sized,
{
    let email = validate_credentials(request).map_err(AuthError::Validation)?;
    let role = role_for(config, &email);
    let password_hash = hash_password(&request.password)?;

    match store.create_user(&email, &password_hash, role).await? {
        Some(user) => {
            info!(user_id = %user.id, role = user.role.as_str(), "Account registered");
            Ok(user)
        }
        None => Err(AuthError::EmailTaken),
    }
}

pub async fn login<S>(
    store: &S,
    config: &AdminConfig,
    now: DateTime<Utc>,
    request: &CredentialsRequest,
) -> Result<LoginResponse, AuthError>
where
    S: AdminUserStore<Error = BoxedError> + ?Sized,
{
    let email = normalize_email(&request.email);
    let Some(user) = store.find_by_email(&email).await? else {
        warn!("Login attempt for unknown account");
        return Err(AuthError::InvalidCredentials);
    };
    if !verify_password(&request.password, &user.password_hash) {
        warn!(user_id = %user.id, "Login attempt with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let (token, expires_at) = issue_token(config, &user, now)?;
    info!(user_id = %user.id, "Signed in");
    Ok(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_at,
        user: user.into(),
    })
}
