use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::UserProfile;

/// Request to search for compatible cats near the adopter
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchCatsRequest {
    #[validate(nested)]
    pub user: UserProfile,
}
