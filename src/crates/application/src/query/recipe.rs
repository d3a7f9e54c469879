use std::sync::Arc;

use crate::error::AppError;
use crate::query::dto::RecipeView;
use domain::profile::UserProfileRepository;
use domain::recipe::{Recipe, RecipeRepository};
use domain::value::{RecipeId, UserId};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 菜谱读取侧：拼装作者资料与评分聚合
#[derive(Clone)]
pub struct RecipeQuery {
    recipe_repo: Arc<dyn RecipeRepository>,
    profile_repo: Arc<dyn UserProfileRepository>,
}

impl RecipeQuery {
    pub fn new(
        recipe_repo: Arc<dyn RecipeRepository>,
        profile_repo: Arc<dyn UserProfileRepository>,
    ) -> Self {
        Self {
            recipe_repo,
            profile_repo,
        }
    }

    async fn to_view(&self, recipe: Recipe, caller: &UserId) -> Result<RecipeView, AppError> {
        let author = self
            .profile_repo
            .find_by_user_id(recipe.author_id.clone())
            .await?;
        Ok(RecipeView::from_parts(recipe, author.as_ref(), caller))
    }

    pub async fn get_recipe(
        &self,
        id: RecipeId,
        caller: &UserId,
    ) -> Result<RecipeView, AppError> {
        let recipe = self
            .recipe_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("recipe with given id wasn't found".to_string())
            })?;
        self.to_view(recipe, caller).await
    }

    /// 按创建时间倒序分页，可选名称正则过滤
    pub async fn latest_recipes(
        &self,
        caller: &UserId,
        count: usize,
        offset: usize,
        name_filter: Option<&str>,
    ) -> Result<Vec<RecipeView>, AppError> {
        let recipes = self.recipe_repo.latest(count, offset, name_filter).await?;
        let mut views = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            views.push(self.to_view(recipe, caller).await?);
        }
        Ok(views)
    }
}
