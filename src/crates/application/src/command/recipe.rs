use std::sync::Arc;

use crate::command::shared::IdGenerator;
use crate::error::AppError;
use crate::image::ImageStore;
use domain::recipe::{Ingredient, Recipe, RecipeRepository};
use domain::value::{ImageRef, RecipeId, UserId};

pub struct CreateRecipeCmd {
    pub author_id: UserId,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub preparation: String,
    pub photos: Vec<ImageRef>,
}

pub struct UpdateRecipeCmd {
    pub recipe_id: RecipeId,
    pub author_id: UserId,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub preparation: String,
    pub photos: Vec<ImageRef>,
}

pub struct RateRecipeCmd {
    pub recipe_id: RecipeId,
    pub user_id: UserId,
    pub rating: i32,
}

#[derive(Clone)]
pub struct RecipeService {
    recipe_repo: Arc<dyn RecipeRepository>,
    image_store: Arc<dyn ImageStore>,
    id_generator: Arc<dyn IdGenerator>,
}

impl RecipeService {
    pub fn new(
        recipe_repo: Arc<dyn RecipeRepository>,
        image_store: Arc<dyn ImageStore>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            recipe_repo,
            image_store,
            id_generator,
        }
    }

    /// 暂存引用提升到菜谱的永久目录，已提升的引用原样通过
    async fn promote_photos(
        &self,
        photos: &[ImageRef],
        recipe_id: &RecipeId,
    ) -> Result<Vec<ImageRef>, AppError> {
        let namespace = format!("recipes/{}", recipe_id);
        let mut promoted = Vec::with_capacity(photos.len());
        for photo in photos {
            promoted.push(self.image_store.promote(photo, &namespace).await?);
        }
        Ok(promoted)
    }

    pub async fn create(&self, cmd: CreateRecipeCmd) -> Result<RecipeId, AppError> {
        let id = RecipeId::from(self.id_generator.next_id().await?);
        let photos = self.promote_photos(&cmd.photos, &id).await?;
        let recipe = Recipe::new(
            id.clone(),
            cmd.author_id,
            &cmd.name,
            cmd.ingredients,
            &cmd.preparation,
            photos,
        );
        self.recipe_repo.create(&recipe).await?;
        log::debug!("recipe {} created", id);
        Ok(id)
    }

    pub async fn update(&self, cmd: UpdateRecipeCmd) -> Result<(), AppError> {
        let mut recipe = self
            .recipe_repo
            .find_by_id(cmd.recipe_id.clone())
            .await?
            .ok_or_else(|| {
                AppError::NotFound("recipe with given id wasn't found".to_string())
            })?;

        if recipe.author_id != cmd.author_id {
            return Err(AppError::Conflict(
                "cannot update a recipe that is not yours".to_string(),
            ));
        }

        let photos = self.promote_photos(&cmd.photos, &cmd.recipe_id).await?;
        recipe.update_content(&cmd.name, cmd.ingredients, &cmd.preparation, photos);
        self.recipe_repo.update(&recipe).await?;
        Ok(())
    }

    pub async fn rate(&self, cmd: RateRecipeCmd) -> Result<(), AppError> {
        let mut recipe = self
            .recipe_repo
            .find_by_id(cmd.recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("recipe with given id wasn't found".to_string())
            })?;

        recipe.add_rating(cmd.user_id, cmd.rating)?;
        self.recipe_repo.update(&recipe).await?;
        Ok(())
    }
}
