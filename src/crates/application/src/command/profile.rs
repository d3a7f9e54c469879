use std::sync::Arc;

use crate::error::AppError;
use crate::image::ImageStore;
use domain::profile::UserProfileRepository;
use domain::value::{ImageRef, UserId};

pub struct UpdateProfileCmd {
    pub user_id: UserId,
    pub user_name: String,
    pub about_me: Option<String>,
    pub title_photo: Option<ImageRef>,
    pub profile_photo: Option<ImageRef>,
}

#[derive(Clone)]
pub struct ProfileService {
    profile_repo: Arc<dyn UserProfileRepository>,
    image_store: Arc<dyn ImageStore>,
}

impl ProfileService {
    pub fn new(
        profile_repo: Arc<dyn UserProfileRepository>,
        image_store: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            profile_repo,
            image_store,
        }
    }

    /// 覆盖资料字段；请求里携带的暂存照片引用先提升到 `users/<userId>`
    pub async fn update(&self, cmd: UpdateProfileCmd) -> Result<(), AppError> {
        let mut profile = self
            .profile_repo
            .find_by_user_id(cmd.user_id.clone())
            .await?
            .ok_or_else(|| {
                AppError::NotFound("user profile with given id wasn't found".to_string())
            })?;

        let namespace = format!("users/{}", cmd.user_id);
        let title_photo = match cmd.title_photo {
            Some(photo) => Some(self.image_store.promote(&photo, &namespace).await?),
            None => None,
        };
        let profile_photo = match cmd.profile_photo {
            Some(photo) => Some(self.image_store.promote(&photo, &namespace).await?),
            None => None,
        };

        profile.user_name = cmd.user_name;
        profile.about_me = cmd.about_me;
        profile.title_photo = title_photo;
        profile.profile_photo = profile_photo;

        self.profile_repo.update(&profile).await?;
        Ok(())
    }
}
