use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    users::{
        dto::UserForm,
        password::hash_password,
        repo::UserRepository,
        repo_types::{User, UserFields},
    },
};

/// Minimum lengths, in bytes of the UTF-8 input.
pub const MIN_NAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Accepts a bare address (`bob@x.com`) or a named mailbox (`Bob <bob@x.com>`).
/// The submitted string is stored as is; only its address part is checked.
pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref ADDR_RE: Regex = Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$"
        )
        .unwrap();
        static ref MAILBOX_RE: Regex = Regex::new(r"^[^<>@]*<([^<>]+)>$").unwrap();
    }
    let addr = match MAILBOX_RE.captures(email.trim()) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => email,
    };
    ADDR_RE.is_match(addr)
}

/// Check a submitted form and hash its password.
///
/// Rules run in a fixed order and stop at the first failure: name length,
/// email syntax, email uniqueness (ignoring the record `except`, if any),
/// password length, then hashing. Creates pass `None` so every record counts.
pub async fn validate_user_form(
    repo: &dyn UserRepository,
    form: UserForm,
    except: Option<Uuid>,
) -> ApiResult<UserFields> {
    let UserForm {
        name,
        email,
        password,
    } = form;

    if name.len() < MIN_NAME_LEN {
        warn!("name too short");
        return Err(ApiError::validation("Name is too short"));
    }

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::validation("Email is not correct"));
    }

    if repo.email_taken(&email, except).await {
        warn!(email = %email, "email already registered");
        return Err(ApiError::validation("Email already exists in database"));
    }

    if password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(ApiError::validation("Password is too short"));
    }

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            error!(error = %e, "hashing task failed");
            ApiError::internal("Couldn't hash password")
        })?
        .map_err(|e| {
            error!(error = %e, "hash_password failed");
            ApiError::internal("Couldn't hash password")
        })?;

    Ok(UserFields {
        name,
        email,
        password_hash,
    })
}

const SAMPLE_USERS: [(&str, &str, &str); 4] = [
    ("Alex", "alexmail@google.com", "6u34rwuej"),
    ("John", "johnmail@google.com", "jb84u43uifv"),
    ("Michael", "michaelmail@google.com", "kdkm438989vjcx"),
    ("Smith", "smithmail@google.com", "k438u9890md"),
];

/// Insert the four sample records, hashing their passwords like any create.
pub async fn seed_sample_users(repo: &dyn UserRepository) -> anyhow::Result<()> {
    for (name, email, password) in SAMPLE_USERS {
        let form = UserForm {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        };
        let fields = validate_user_form(repo, form, None)
            .await
            .map_err(|e| anyhow::anyhow!("seeding {}: {}", email, e))?;
        repo.insert(User::new(fields)).await?;
    }
    info!(count = SAMPLE_USERS.len(), "sample users seeded");
    Ok(())
}
