use chrono::NaiveDateTime;
use domain::profile::UserProfile;
use domain::recipe::{Ingredient, Recipe};
use domain::value::UserId;

/// 菜谱作者摘要
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorView {
    pub id: String,
    pub name: String,
    pub profile_photo: Option<String>,
}

impl From<&UserProfile> for AuthorView {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.user_id.to_string(),
            name: profile.user_name.clone(),
            profile_photo: profile.profile_photo.as_ref().map(|p| p.to_string()),
        }
    }
}

/// 菜谱读模型，评分在此聚合
#[derive(Debug, Clone)]
pub struct RecipeView {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub author: Option<AuthorView>,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub preparation: String,
    pub rating: f64,
    pub my_rating: Option<i32>,
    pub rating_count: usize,
    pub photos: Vec<String>,
}

impl RecipeView {
    pub fn from_parts(recipe: Recipe, author: Option<&UserProfile>, caller: &UserId) -> Self {
        Self {
            id: recipe.id.to_string(),
            created_at: recipe.created_at,
            author: author.map(AuthorView::from),
            name: recipe.name.clone(),
            rating: recipe.average_rating(),
            my_rating: recipe.rating_of(caller),
            rating_count: recipe.ratings.len(),
            photos: recipe.photos.iter().map(|p| p.to_string()).collect(),
            ingredients: recipe.ingredients,
            preparation: recipe.preparation,
        }
    }
}

/// 用户资料读模型
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub user_id: String,
    pub user_name: String,
    pub about_me: Option<String>,
    pub title_photo: Option<String>,
    pub profile_photo: Option<String>,
}

impl From<UserProfile> for ProfileView {
    fn from(profile: UserProfile) -> Self {
        Self {
            user_id: profile.user_id.to_string(),
            user_name: profile.user_name,
            about_me: profile.about_me,
            title_photo: profile.title_photo.map(|p| p.to_string()),
            profile_photo: profile.profile_photo.map(|p| p.to_string()),
        }
    }
}
