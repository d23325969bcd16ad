//! Account operations for Journey.

use uuid::Uuid;

use super::{trip_ops::ensure_self, Journey};
use crate::{
    access::Caller,
    db::current_timestamp,
    error::{JourneyError, Resource, Result},
    models::User,
    params::{Login, SignUp, UpdateUser},
    password::{hash_password, verify_password},
};

const MIN_PASSWORD_LEN: usize = 6;

/// Loose address check: `local@domain.tld` with a 2 to 4 letter suffix.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let word = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';

    if local.is_empty() || !local.chars().all(|c| word(c) || c == '.') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };
    !hosts.is_empty()
        && hosts.iter().all(|h| !h.is_empty() && h.chars().all(word))
        && (2..=4).contains(&tld.len())
        && tld.chars().all(word)
}

fn validate_email(email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(JourneyError::invalid_input("email").with_reason("Invalid email address entered"))
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(JourneyError::invalid_input("password")
            .with_reason("Password needs to be at least 6 characters"))
    }
}

/// Empty strings from forms count as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Journey {
    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::InvalidInput` for a malformed email or a short password
    /// Returns `JourneyError::AlreadyExists` if the email or username is taken
    pub async fn sign_up(&self, params: SignUp) -> Result<User> {
        let email = params.email.trim().to_string();
        if email.is_empty() {
            return Err(JourneyError::invalid_input("email").with_reason("Missing email"));
        }
        validate_email(&email)?;
        validate_password(&params.password)?;

        let user = User {
            id: Uuid::new_v4(),
            email,
            username: non_blank(params.username),
            name: non_blank(params.name),
            signup_date: current_timestamp(),
            password_hash: hash_password(&params.password)?,
        };

        self.with_database(move |db| {
            db.create_user(&user)?;
            Ok(user)
        })
        .await
    }

    /// Checks credentials, by username if one is given, otherwise by email.
    ///
    /// Unknown accounts and wrong passwords fail the same way.
    pub async fn login(&self, params: Login) -> Result<User> {
        let username = non_blank(params.username);
        let email = non_blank(params.email);
        if username.is_none() && email.is_none() {
            return Err(JourneyError::invalid_input("username")
                .with_reason("Missing username or email"));
        }
        if params.password.is_empty() {
            return Err(JourneyError::invalid_input("password").with_reason("Missing password"));
        }

        self.with_database(move |db| {
            let user = match (username, email) {
                (Some(username), _) => db.find_user_by_username(&username)?,
                (None, Some(email)) => db.find_user_by_email(&email)?,
                (None, None) => None,
            }
            .ok_or(JourneyError::InvalidCredentials)?;

            if verify_password(&params.password, &user.password_hash)? {
                Ok(user)
            } else {
                Err(JourneyError::InvalidCredentials)
            }
        })
        .await
    }

    /// Looks up an account by id, without an access check. Used to resolve
    /// authenticated callers.
    pub async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        self.with_database(move |db| db.get_user(user_id)).await
    }

    pub async fn get_user(&self, caller: Caller, user_id: Uuid) -> Result<User> {
        ensure_self(caller, user_id)?;
        self.find_user(user_id)
            .await?
            .ok_or_else(|| JourneyError::not_found(Resource::User, user_id))
    }

    /// Updates account fields. Returns the updated user and the names of
    /// the fields that actually changed.
    pub async fn update_user(
        &self,
        caller: Caller,
        user_id: Uuid,
        params: UpdateUser,
    ) -> Result<(User, Vec<&'static str>)> {
        ensure_self(caller, user_id)?;

        if let Some(email) = &params.email {
            validate_email(email.trim())?;
        }
        if let Some(password) = &params.password {
            validate_password(password)?;
        }

        self.with_database(move |db| {
            let mut user = db
                .get_user(user_id)?
                .ok_or_else(|| JourneyError::not_found(Resource::User, user_id))?;
            let mut changed = Vec::new();

            if let Some(email) = params.email.map(|e| e.trim().to_string()) {
                if email != user.email {
                    user.email = email;
                    changed.push("email");
                }
            }
            if let Some(username) = params.username {
                let username = non_blank(Some(username));
                if username != user.username {
                    user.username = username;
                    changed.push("username");
                }
            }
            if let Some(name) = params.name {
                let name = non_blank(Some(name));
                if name != user.name {
                    user.name = name;
                    changed.push("name");
                }
            }
            if let Some(password) = params.password {
                if !verify_password(&password, &user.password_hash)? {
                    user.password_hash = hash_password(&password)?;
                    changed.push("password");
                }
            }

            if !changed.is_empty() {
                db.update_user(&user)?;
            }
            Ok((user, changed))
        })
        .await
    }

    /// Deletes an account with all of its trips and journal entries.
    pub async fn delete_user(&self, caller: Caller, user_id: Uuid) -> Result<()> {
        ensure_self(caller, user_id)?;

        self.with_database(move |db| {
            if db.delete_user(user_id)? {
                Ok(())
            } else {
                Err(JourneyError::not_found(Resource::User, user_id))
            }
        })
        .await
    }
}
