//! Accounts and authentication.
//!
//! Credentials are an opaque phone/password pair checked against the store;
//! password policy and hashing are explicitly out of scope here.

use anyhow::Result;
use std::sync::Arc;

use super::commands::RegisterUserCommand;
use super::error::DomainError;
use super::models::{new_id, User, UserRole};
use crate::storage::EntityStore;

pub struct UserService {
    store: Arc<EntityStore>,
}

impl UserService {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    pub async fn login(&self, phone: &str, password: &str) -> Result<User> {
        match self.store.login(phone, password).await? {
            Some(user) => {
                log::info!("login ok for user {}", user.id);
                Ok(user)
            }
            None => Err(DomainError::BadCredentials.into()),
        }
    }

    /// Create a client account. Phones are unique account keys.
    pub async fn register(&self, cmd: RegisterUserCommand) -> Result<User> {
        if cmd.name.trim().is_empty() {
            return Err(DomainError::MissingField("name").into());
        }
        if cmd.phone.trim().is_empty() {
            return Err(DomainError::MissingField("phone").into());
        }
        if cmd.password.is_empty() {
            return Err(DomainError::MissingField("password").into());
        }

        let user = User {
            id: new_id(),
            name: cmd.name,
            phone: cmd.phone,
            password: cmd.password,
            role: UserRole::Client,
            points: 0,
        };
        if !self.store.register(&user).await? {
            return Err(DomainError::DuplicatePhone.into());
        }
        log::info!("registered user {} ({})", user.id, user.name);
        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.store.get_user(user_id).await
    }
}
