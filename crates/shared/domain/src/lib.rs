//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user entity, the validation gate that guards every write, and
//! credential hashing.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{Password, PasswordPolicy};
pub use user::{deserialize_birthday, User, UserData, UserDraft, UserId};
pub use validation::is_valid_email;
