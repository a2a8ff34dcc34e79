//! User accounts

use std::sync::Arc;

use thiserror::Error;

use procura_model::{new_id, User, UserForm, ValidationError};
use procura_store::MemoryStore;

/// Errors from user management
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Account listing and creation.
///
/// Emails are unique and stored lowercased, so lookup by email is
/// case-insensitive.
pub struct UserService {
    store: Arc<MemoryStore>,
}

impl UserService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<User> {
        self.store.read().users.clone()
    }

    pub fn get(&self, id: &str) -> Result<User, UserError> {
        self.store
            .read()
            .user(id)
            .cloned()
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    pub fn by_email(&self, email: &str) -> Result<User, UserError> {
        self.store
            .read()
            .user_by_email(email)
            .cloned()
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    pub fn create(&self, form: &UserForm) -> Result<User, UserError> {
        form.validate()?;

        let mut state = self.store.write();
        if state.user_by_email(&form.email).is_some() {
            return Err(UserError::DuplicateEmail);
        }

        let user = User::new(new_id(), form.name.clone(), form.role, form.email.to_lowercase());
        state.users.push(user.clone());
        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_model::Role;

    #[test]
    fn test_create_lowercases_email() {
        let service = UserService::new(Arc::new(MemoryStore::empty()));

        let user = service
            .create(&UserForm {
                name: "Rani Kusuma".to_string(),
                email: "Rani.Kusuma@Example.com".to_string(),
                role: Role::Approver,
            })
            .unwrap();

        assert_eq!(user.email, "rani.kusuma@example.com");
        assert_eq!(service.by_email("RANI.KUSUMA@example.com").unwrap().id, user.id);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let service = UserService::new(Arc::new(MemoryStore::seeded()));

        let result = service.create(&UserForm {
            name: "Duplicate".to_string(),
            email: "EMPLOYEE@example.com".to_string(),
            role: Role::Employee,
        });
        assert!(matches!(result, Err(UserError::DuplicateEmail)));
    }

    #[test]
    fn test_seeded_accounts_resolve() {
        let service = UserService::new(Arc::new(MemoryStore::seeded()));

        assert_eq!(service.list().len(), 4);
        let finance = service.get("user-finance").unwrap();
        assert_eq!(finance.role, Role::Finance);
        assert!(matches!(service.get("user-nobody"), Err(UserError::NotFound(_))));
    }
}
