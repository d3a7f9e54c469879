use std::sync::Arc;

use crate::error::AppError;
use crate::query::dto::ProfileView;
use domain::profile::UserProfileRepository;
use domain::value::UserId;

#[derive(Clone)]
pub struct ProfileQuery {
    profile_repo: Arc<dyn UserProfileRepository>,
}

impl ProfileQuery {
    pub fn new(profile_repo: Arc<dyn UserProfileRepository>) -> Self {
        Self { profile_repo }
    }

    pub async fn get_profile(&self, user_id: UserId) -> Result<ProfileView, AppError> {
        let profile = self
            .profile_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("user profile with given id wasn't found".to_string())
            })?;
        Ok(ProfileView::from(profile))
    }
}
