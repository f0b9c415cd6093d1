use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::user::password::{hash_password, is_long_enough, verify_password, MIN_PASSWORD_LEN};
use crate::user::repo::{InsertUserError, UserRepo};
use crate::user::repo_types::{NewUser, User, UserChanges};

pub const MAX_NAME_LEN: usize = 255;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trims the address and lowercases the domain part (after the last `@`).
/// The local part is kept as typed.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

pub fn validate_password(password: &str) -> ApiResult<()> {
    if !is_long_enough(password) {
        return Err(ApiError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> ApiResult<()> {
    if name.is_empty() {
        return Err(ApiError::validation("name may not be blank"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

async fn insert_user(
    users: &dyn UserRepo,
    email: &str,
    password: &str,
    name: Option<&str>,
    privileged: bool,
) -> ApiResult<User> {
    let email = normalize_email(email);
    if email.is_empty() {
        warn!("signup without email");
        return Err(ApiError::validation("users must have an email address"));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::validation("enter a valid email address"));
    }
    validate_password(password)?;
    let name = name.map(str::trim).unwrap_or_default();
    if !name.is_empty() {
        validate_name(name)?;
    }

    let password_hash = hash_password(password)?;
    let new_user = NewUser {
        email,
        password_hash,
        name: name.to_string(),
        is_staff: privileged,
        is_superuser: privileged,
    };

    match users.insert(new_user).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, superuser = privileged, "user created");
            Ok(user)
        }
        Err(InsertUserError::DuplicateEmail) => {
            warn!("email already registered");
            Err(ApiError::validation("user with this email already exists"))
        }
        Err(InsertUserError::Backend(e)) => Err(ApiError::Internal(e)),
    }
}

/// Creates a regular account. Only the argon2 hash of `password` is stored.
pub async fn create_user(
    users: &dyn UserRepo,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> ApiResult<User> {
    insert_user(users, email, password, name, false).await
}

/// Creates an account with `is_staff` and `is_superuser` set.
pub async fn create_superuser(users: &dyn UserRepo, email: &str, password: &str) -> ApiResult<User> {
    insert_user(users, email, password, None, true).await
}

/// Returns the user only if the email exists, the password matches and the
/// account is active. All failures look the same to the caller.
pub async fn verify_credentials(
    users: &dyn UserRepo,
    email: &str,
    password: &str,
) -> ApiResult<Option<User>> {
    let email = normalize_email(email);
    let Some(user) = users.find_by_email(&email).await? else {
        // Hash anyway so unknown emails take as long as wrong passwords.
        let _ = hash_password(password);
        debug!("credentials rejected: unknown email");
        return Ok(None);
    };

    if !verify_password(password, &user.password_hash)? {
        debug!(user_id = %user.id, "credentials rejected: wrong password");
        return Ok(None);
    }
    if !user.is_active {
        debug!(user_id = %user.id, "credentials rejected: inactive account");
        return Ok(None);
    }
    Ok(Some(user))
}

/// Partial self-service update of name and/or password.
pub async fn update_profile(
    users: &dyn UserRepo,
    caller: &User,
    name: Option<String>,
    password: Option<String>,
) -> ApiResult<User> {
    let mut changes = UserChanges::default();
    if let Some(name) = name {
        let name = name.trim().to_string();
        validate_name(&name)?;
        changes.name = Some(name);
    }
    if let Some(password) = password {
        validate_password(&password)?;
        changes.password_hash = Some(hash_password(&password)?);
    }

    let updated = users
        .update(caller.id, changes)
        .await?
        .ok_or_else(|| ApiError::unauthorized("user inactive or deleted"))?;
    info!(user_id = %updated.id, "profile updated");
    Ok(updated)
}
