use poem_openapi::Object;

use crate::types::db::profile;
use crate::types::dto::common::to_rfc3339;

/// Profile row belonging to a user
#[derive(Object, Debug, Clone)]
pub struct Profile {
    pub id: String,
    pub user_id: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    /// ISO 8601
    pub created_at: String,
    /// ISO 8601
    pub updated_at: String,
}

impl From<profile::Model> for Profile {
    fn from(model: profile::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            full_name: model.full_name,
            phone: model.phone,
            avatar_url: model.avatar_url,
            created_at: to_rfc3339(model.created_at),
            updated_at: to_rfc3339(model.updated_at),
        }
    }
}

/// Partial profile update; absent fields are left untouched
#[derive(Object, Debug, Default, Clone)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}
