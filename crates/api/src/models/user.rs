//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bramble_core::{Email, Gender, PersonName, Phone, UserId};

/// A registered user.
///
/// The password hash is stored but never serialized into a response.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: PersonName,
    pub email: Email,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Phone,
    pub gender: Gender,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated registration, ready to persist.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: PersonName,
    pub email: Email,
    pub password_hash: String,
    pub phone: Phone,
    pub gender: Gender,
}

/// A validated partial update. `None` fields retain their stored values.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<PersonName>,
    pub email: Option<Email>,
    pub password_hash: Option<String>,
    pub phone: Option<Phone>,
    pub gender: Option<Gender>,
}

impl UserPatch {
    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.phone.is_none()
            && self.gender.is_none()
    }
}

/// Raw registration/update payload as received from the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
}

impl UserPayload {
    /// True when the client supplied no recognized field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.phone.is_none()
            && self.gender.is_none()
    }
}

/// Raw login payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: UserId::new(1),
            name: PersonName::parse("Asha Rao").unwrap(),
            email: Email::parse("asha@example.com").unwrap(),
            password_hash: "$argon2id$v=19$secret".to_owned(),
            phone: Phone::parse("9876543210").unwrap(),
            gender: Gender::Female,
            created_at: DateTime::<Utc>::MIN_UTC,
            updated_at: DateTime::<Utc>::MIN_UTC,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"email\":\"asha@example.com\""));
    }

    #[test]
    fn test_payload_empty_detection() {
        assert!(UserPayload::default().is_empty());

        let payload: UserPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.is_empty());

        // unknown keys deserialize to an all-None payload
        let payload: UserPayload = serde_json::from_str(r#"{"bogus": 1}"#).unwrap();
        assert!(payload.is_empty());

        let payload: UserPayload = serde_json::from_str(r#"{"name": "Asha"}"#).unwrap();
        assert!(!payload.is_empty());
    }
}
