//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::user_handler::{CreateUserResponse, UserRequest};
use domain::User;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
    ),
    components(
        schemas(
            UserRequest,
            CreateUserResponse,
            User,
        )
    ),
    tags(
        (name = "Users", description = "User account endpoints"),
    )
)]
pub struct ApiDoc;
