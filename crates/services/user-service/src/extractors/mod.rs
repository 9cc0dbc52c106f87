//! Request extractors.

mod user_id;
mod validated_json;

pub use user_id::UserIdQuery;
pub use validated_json::ValidatedJson;

pub const MSG_ID_REQUIRED: &str = "Id is required";
pub const MSG_INVALID_ID: &str = "Invalid id";
pub const MSG_INVALID_BODY: &str = "Invalid body";
