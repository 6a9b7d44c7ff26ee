//! User account controller.

use async_trait::async_trait;

use bramble_core::{Email, Gender, PersonName, Phone, UserId};

use crate::db::RepositoryError;
use crate::error::{ApiError, Result};
use crate::models::{LoginPayload, NewUser, User, UserPatch, UserPayload};
use crate::services::auth;

/// The user collection, as seen by the controller.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find(&self) -> std::result::Result<Vec<User>, RepositoryError>;

    async fn find_by_gender(
        &self,
        gender: Gender,
    ) -> std::result::Result<Vec<User>, RepositoryError>;

    async fn find_one_by_email(
        &self,
        email: &Email,
    ) -> std::result::Result<Option<User>, RepositoryError>;

    async fn find_by_id(&self, id: UserId) -> std::result::Result<Option<User>, RepositoryError>;

    async fn create(&self, new: NewUser) -> std::result::Result<User, RepositoryError>;

    async fn find_by_id_and_update(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> std::result::Result<Option<User>, RepositoryError>;

    async fn find_by_id_and_delete(
        &self,
        id: UserId,
    ) -> std::result::Result<Option<User>, RepositoryError>;
}

/// Account operations: register, login, list, partial update, delete.
pub struct UserService<S> {
    store: S,
}

impl<S: UserStore> UserService<S> {
    /// Create a new user service over a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new account. Every field is required; the password is
    /// policy-checked and hashed before it reaches the store.
    ///
    /// # Errors
    ///
    /// `Validation` for bad fields, `Conflict` for an already-registered
    /// email, `Repository` when the store fails.
    pub async fn register(&self, payload: UserPayload) -> Result<User> {
        if payload.is_empty() {
            return Err(ApiError::Validation("No data provided".to_owned()));
        }

        let name = parse_person_name(payload.name.as_deref())?;
        let email = parse_email(payload.email.as_deref())?;

        if self.store.find_one_by_email(&email).await?.is_some() {
            return Err(ApiError::Conflict("Email already registered".to_owned()));
        }

        let password = payload
            .password
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::Validation("Password is required".to_owned()))?;
        auth::validate_password(password)?;
        let password_hash = auth::hash_password(password)?;

        let phone = parse_phone(payload.phone.as_deref())?;
        let gender = parse_gender(payload.gender.as_deref())?;

        let user = self
            .store
            .create(NewUser {
                name,
                email,
                password_hash,
                phone,
                gender,
            })
            .await?;

        Ok(user)
    }

    /// Verify a login and return the account. Token minting happens at the
    /// route layer; this only proves the credentials.
    ///
    /// # Errors
    ///
    /// `Validation` for missing fields, `Auth(InvalidCredentials)` when the
    /// email is unknown or the password does not match.
    pub async fn login(&self, payload: LoginPayload) -> Result<User> {
        let email = parse_email(payload.email.as_deref())?;
        let password = payload
            .password
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::Validation("Password is required".to_owned()))?;

        let user = self
            .store
            .find_one_by_email(&email)
            .await?
            .ok_or(ApiError::Auth(auth::AuthError::InvalidCredentials))?;

        auth::verify_password(password, &user.password_hash)?;

        Ok(user)
    }

    /// List all accounts. An empty list is a successful result.
    ///
    /// # Errors
    ///
    /// `Repository` when the store fails.
    pub async fn list(&self) -> Result<Vec<User>> {
        Ok(self.store.find().await?)
    }

    /// List accounts matching a gender query parameter.
    ///
    /// # Errors
    ///
    /// `Validation` when the parameter is missing or not a known value.
    pub async fn list_by_gender(&self, raw: Option<&str>) -> Result<Vec<User>> {
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::Validation("Gender query parameter is required".to_owned()))?;

        let gender: Gender = raw
            .parse()
            .map_err(|e: bramble_core::GenderError| ApiError::Validation(e.to_string()))?;

        Ok(self.store.find_by_gender(gender).await?)
    }

    /// Partially update an account. Only fields present in the payload
    /// change; the email uniqueness check runs only when the email actually
    /// differs from the stored one, and a supplied password is re-checked
    /// and re-hashed.
    ///
    /// # Errors
    ///
    /// `Validation`, `NotFound`, `Conflict`, or `Repository`.
    pub async fn update(&self, raw_id: &str, payload: UserPayload) -> Result<User> {
        let id = parse_user_id(raw_id)?;

        if payload.is_empty() {
            return Err(ApiError::Validation(
                "No data provided for update".to_owned(),
            ));
        }

        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_owned()))?;

        let mut patch = UserPatch::default();

        if let Some(raw) = payload.name.as_deref() {
            patch.name = Some(parse_person_name(Some(raw))?);
        }

        if let Some(raw) = payload.email.as_deref() {
            let email = parse_email(Some(raw))?;
            if email != existing.email {
                if self.store.find_one_by_email(&email).await?.is_some() {
                    return Err(ApiError::Conflict("Email already registered".to_owned()));
                }
                patch.email = Some(email);
            }
        }

        if let Some(raw) = payload.password.as_deref() {
            auth::validate_password(raw)?;
            patch.password_hash = Some(auth::hash_password(raw)?);
        }

        if let Some(raw) = payload.phone.as_deref() {
            patch.phone = Some(parse_phone(Some(raw))?);
        }

        if let Some(raw) = payload.gender.as_deref() {
            patch.gender = Some(parse_gender(Some(raw))?);
        }

        if patch.is_empty() {
            return Ok(existing);
        }

        self.store
            .find_by_id_and_update(id, patch)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_owned()))
    }

    /// Delete an account, read-then-delete.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed id, `NotFound` when it does not resolve.
    pub async fn delete(&self, raw_id: &str) -> Result<User> {
        let id = parse_user_id(raw_id)?;

        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_owned()))?;

        self.store
            .find_by_id_and_delete(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_owned()))
    }
}

fn parse_user_id(raw: &str) -> Result<UserId> {
    raw.parse()
        .map_err(|_| ApiError::Validation("Invalid user id".to_owned()))
}

fn parse_person_name(value: Option<&str>) -> Result<PersonName> {
    let raw = value
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Name is required".to_owned()))?;
    PersonName::parse(raw)
        .map_err(|_| ApiError::Validation("Name may only contain letters and spaces".to_owned()))
}

fn parse_email(value: Option<&str>) -> Result<Email> {
    let raw = value
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Email is required".to_owned()))?;
    Email::parse(raw).map_err(|_| ApiError::Validation("Valid email is required".to_owned()))
}

fn parse_phone(value: Option<&str>) -> Result<Phone> {
    let raw = value
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Phone number is required".to_owned()))?;
    Phone::parse(raw)
        .map_err(|_| ApiError::Validation("Valid phone number is required".to_owned()))
}

fn parse_gender(value: Option<&str>) -> Result<Gender> {
    let raw = value
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Gender is required".to_owned()))?;
    raw.parse()
        .map_err(|e: bramble_core::GenderError| ApiError::Validation(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::testing::MemUsers;

    fn payload(name: &str, email: &str) -> UserPayload {
        UserPayload {
            name: Some(name.to_owned()),
            email: Some(email.to_owned()),
            password: Some("Str0ng@Pass".to_owned()),
            phone: Some("9876543210".to_owned()),
            gender: Some("female".to_owned()),
        }
    }

    fn service() -> UserService<MemUsers> {
        UserService::new(MemUsers::default())
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let user = service().register(payload("Asha", "a@b.com")).await.unwrap();
        assert_ne!(user.password_hash, "Str0ng@Pass");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let service = service();
        service.register(payload("Asha", "a@b.com")).await.unwrap();
        let err = service
            .register(payload("Ravi", "a@b.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_field_validation() {
        let service = service();

        let mut p = payload("Asha", "a@b.com");
        p.name = Some("A5ha!".to_owned());
        assert!(matches!(
            service.register(p).await.unwrap_err(),
            ApiError::Validation(_)
        ));

        let mut p = payload("Asha", "not-an-email");
        p.email = Some("not-an-email".to_owned());
        assert!(matches!(
            service.register(p).await.unwrap_err(),
            ApiError::Validation(_)
        ));

        let mut p = payload("Asha", "a@b.com");
        p.password = Some("weak".to_owned());
        assert!(matches!(
            service.register(p).await.unwrap_err(),
            ApiError::Auth(auth::AuthError::WeakPassword(_))
        ));

        let mut p = payload("Asha", "a@b.com");
        p.phone = Some("12345".to_owned());
        assert!(matches!(
            service.register(p).await.unwrap_err(),
            ApiError::Validation(_)
        ));

        let mut p = payload("Asha", "a@b.com");
        p.gender = Some("unknown".to_owned());
        assert!(matches!(
            service.register(p).await.unwrap_err(),
            ApiError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_login_roundtrip() {
        let service = service();
        service.register(payload("Asha", "a@b.com")).await.unwrap();

        let user = service
            .login(LoginPayload {
                email: Some("a@b.com".to_owned()),
                password: Some("Str0ng@Pass".to_owned()),
            })
            .await
            .unwrap();
        assert_eq!(user.email.as_str(), "a@b.com");

        let err = service
            .login(LoginPayload {
                email: Some("a@b.com".to_owned()),
                password: Some("Wr0ng@Pass".to_owned()),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Auth(auth::AuthError::InvalidCredentials)
        ));

        // unknown email reads the same as a bad password
        let err = service
            .login(LoginPayload {
                email: Some("nobody@b.com".to_owned()),
                password: Some("Str0ng@Pass".to_owned()),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Auth(auth::AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_list_by_gender() {
        let service = service();
        service.register(payload("Asha", "a@b.com")).await.unwrap();
        let mut p = payload("Ravi", "r@b.com");
        p.gender = Some("male".to_owned());
        service.register(p).await.unwrap();

        let women = service.list_by_gender(Some("Female")).await.unwrap();
        assert_eq!(women.len(), 1);
        assert_eq!(women[0].name.as_str(), "Asha");

        assert!(matches!(
            service.list_by_gender(None).await.unwrap_err(),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            service.list_by_gender(Some("robot")).await.unwrap_err(),
            ApiError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_update_subset_preserves_other_fields() {
        let service = service();
        let created = service.register(payload("Asha", "a@b.com")).await.unwrap();

        let updated = service
            .update(
                &created.id.to_string(),
                UserPayload {
                    phone: Some("8876543210".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.phone.as_str(), "8876543210");
        assert_eq!(updated.name.as_str(), "Asha");
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.gender, created.gender);
    }

    #[tokio::test]
    async fn test_update_same_email_is_not_a_conflict() {
        let service = service();
        let created = service.register(payload("Asha", "a@b.com")).await.unwrap();

        let updated = service
            .update(
                &created.id.to_string(),
                UserPayload {
                    email: Some("a@b.com".to_owned()),
                    name: Some("Asha Rao".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name.as_str(), "Asha Rao");
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let service = service();
        service.register(payload("Asha", "a@b.com")).await.unwrap();
        let other = service.register(payload("Ravi", "r@b.com")).await.unwrap();

        let err = service
            .update(
                &other.id.to_string(),
                UserPayload {
                    email: Some("a@b.com".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_unknown_user_is_not_found() {
        assert!(matches!(
            service().delete("42").await.unwrap_err(),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            service().delete("bogus").await.unwrap_err(),
            ApiError::Validation(_)
        ));
    }
}
