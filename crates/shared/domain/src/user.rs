//! User domain entity and related types.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{MASKED_PASSWORD, MSG_EMAIL_REQUIRED, MSG_INVALID_EMAIL};
use crate::error::DomainResult;
use crate::password::{Password, PasswordPolicy};
use crate::validation::is_valid_email;
use crate::DomainError;

/// Store-assigned user identifier
pub type UserId = u64;

/// User domain entity.
///
/// Outside the record store `password` only ever holds [`MASKED_PASSWORD`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Unique user identifier
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: UserId,
    /// First name
    #[serde(rename = "name")]
    #[cfg_attr(feature = "openapi", schema(example = "John"))]
    pub first_name: String,
    /// Last name
    #[serde(rename = "surname")]
    #[cfg_attr(feature = "openapi", schema(example = "Doe"))]
    pub last_name: String,
    /// Date of birth
    #[serde(default, deserialize_with = "deserialize_birthday")]
    pub birthday: Option<NaiveDate>,
    /// Login (email address), unique across users
    #[serde(rename = "email")]
    #[cfg_attr(feature = "openapi", schema(example = "john.doe@example.com"))]
    pub login: String,
    /// Credential placeholder
    #[cfg_attr(feature = "openapi", schema(example = "***"))]
    pub password: String,
}

impl User {
    /// Replace the credential with the masking placeholder.
    pub fn masked(mut self) -> Self {
        self.password = MASKED_PASSWORD.to_string();
        self
    }

    /// Check whether the credential has been masked
    pub fn is_masked(&self) -> bool {
        self.password == MASKED_PASSWORD
    }
}

/// Deserialize an optional birthday.
///
/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp, of which only
/// the date in its own offset is kept. Always serialized as a plain date.
pub fn deserialize_birthday<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(&raw)
        .map(|timestamp| Some(timestamp.date_naive()))
        .map_err(|_| serde::de::Error::custom(format!("invalid birthday: {}", raw)))
}

/// User fields as submitted by a client, password still in plain text.
///
/// Used for both creation and full replacement.
#[derive(Clone, Deserialize)]
pub struct UserDraft {
    #[serde(rename = "name", default)]
    pub first_name: String,
    #[serde(rename = "surname", default)]
    pub last_name: String,
    #[serde(default, deserialize_with = "deserialize_birthday")]
    pub birthday: Option<NaiveDate>,
    #[serde(rename = "email", default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDraft")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("birthday", &self.birthday)
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl UserDraft {
    /// Run the validation gate: login first, then password strength.
    ///
    /// On success the plain-text password is consumed and replaced by its hash.
    ///
    /// # Errors
    /// - [`DomainError::Validation`] for an empty or malformed email
    /// - [`DomainError::WeakCredential`] for a password the policy rejects
    pub fn validate(self, policy: &PasswordPolicy) -> DomainResult<UserData> {
        if self.login.is_empty() {
            return Err(DomainError::validation(MSG_EMAIL_REQUIRED));
        }
        if !is_valid_email(&self.login) {
            return Err(DomainError::validation(MSG_INVALID_EMAIL));
        }

        let password = Password::with_policy(&self.password, policy)?;

        Ok(UserData {
            first_name: self.first_name,
            last_name: self.last_name,
            birthday: self.birthday,
            login: self.login,
            password,
        })
    }
}

/// Validated user fields ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<NaiveDate>,
    pub login: String,
    pub password: Password,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(login: &str, password: &str) -> UserDraft {
        UserDraft {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 17),
            login: login.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate_hashes_password() {
        let data = draft("john.doe@example.com", "StrongPassword123!")
            .validate(&PasswordPolicy::default())
            .unwrap();

        assert_eq!(data.login, "john.doe@example.com");
        assert_eq!(data.first_name, "John");
        assert_ne!(data.password.as_str(), "StrongPassword123!");
        assert!(data.password.verify("StrongPassword123!"));
    }

    #[test]
    fn test_validate_empty_email() {
        let err = draft("", "StrongPassword123!")
            .validate(&PasswordPolicy::default())
            .unwrap_err();
        assert_eq!(err, DomainError::validation(MSG_EMAIL_REQUIRED));
    }

    #[test]
    fn test_validate_invalid_email() {
        let err = draft("invalid-email", "StrongPassword123!")
            .validate(&PasswordPolicy::default())
            .unwrap_err();
        assert_eq!(err, DomainError::validation(MSG_INVALID_EMAIL));
    }

    #[test]
    fn test_email_checked_before_password() {
        let err = draft("invalid-email", "123")
            .validate(&PasswordPolicy::default())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_validate_weak_password() {
        let err = draft("weak.password@example.com", "123")
            .validate(&PasswordPolicy::default())
            .unwrap_err();
        assert!(matches!(err, DomainError::WeakCredential(_)));
    }

    #[test]
    fn test_masked_replaces_credential() {
        let user = User {
            id: 7,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            birthday: None,
            login: "john.doe@example.com".to_string(),
            password: "$argon2id$v=19$...".to_string(),
        };

        let masked = user.clone().masked();
        assert!(masked.is_masked());
        assert_eq!(masked.password, MASKED_PASSWORD);
        assert_eq!(masked.clone().masked(), masked);
        assert!(!user.is_masked());
    }

    #[test]
    fn test_user_json_field_names() {
        let user = User {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 17),
            login: "john.doe@example.com".to_string(),
            password: MASKED_PASSWORD.to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["name"], "John");
        assert_eq!(json["surname"], "Doe");
        assert_eq!(json["birthday"], "1990-05-17");
        assert_eq!(json["email"], "john.doe@example.com");
        assert_eq!(json["password"], "***");
    }

    #[test]
    fn test_draft_accepts_timestamp_birthday() {
        let json = r#"{"name":"John","email":"john.doe@example.com","birthday":"1990-05-17T00:00:00Z","password":"StrongPassword123!"}"#;
        let draft: UserDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.birthday, NaiveDate::from_ymd_opt(1990, 5, 17));

        // Date part is taken in the timestamp's own offset
        let json = r#"{"birthday":"1990-05-17T23:30:00-05:00"}"#;
        let draft: UserDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.birthday, NaiveDate::from_ymd_opt(1990, 5, 17));
    }

    #[test]
    fn test_birthday_rejects_other_strings() {
        for raw in ["yesterday", "17.05.1990", ""] {
            let json = format!(r#"{{"birthday":"{}"}}"#, raw);
            assert!(serde_json::from_str::<UserDraft>(&json).is_err());
        }

        let draft: UserDraft = serde_json::from_str(r#"{"birthday":null}"#).unwrap();
        assert!(draft.birthday.is_none());
    }

    #[test]
    fn test_timestamp_birthday_serializes_as_date() {
        let json = r#"{"id":3,"name":"John","surname":"Doe","birthday":"1990-05-17T00:00:00Z","email":"john.doe@example.com","password":"***"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&user).unwrap();
        assert_eq!(out["birthday"], "1990-05-17");
    }

    #[test]
    fn test_draft_without_birthday() {
        let json = r#"{"name":"John","surname":"Doe","email":"john.doe@example.com","password":"StrongPassword123!"}"#;
        let draft: UserDraft = serde_json::from_str(json).unwrap();
        assert!(draft.birthday.is_none());
        assert_eq!(draft.login, "john.doe@example.com");
        assert!(!format!("{:?}", draft).contains("StrongPassword123!"));
    }
}
