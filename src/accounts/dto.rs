use serde::Deserialize;
use validator::Validate;

/// Request body for account creation.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 2, max = 255, message = "name must be 2 to 255 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    // No length or complexity rule; presence is enforced by deserialization.
    pub password: String,
}
