use domain::profile::ProfileError;
use domain::recipe::RecipeError;
use domain::user::UserError;

use thiserror::Error;

/// 应用层错误
///
/// 所有可恢复的失败都会落到这里；致命的配置错误在启动期暴露，
/// 不走这个类型。
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Not found: {0}")]
    NotFound(String),

    // upload rejections
    #[error("Invalid or missing content type: {0}")]
    InvalidContentType(String),
    #[error("Uploaded file is too big: declared {declared} bytes, max is {max}")]
    PayloadTooLarge { declared: u64, max: u64 },
    #[error("File size doesn't match declared length: declared {declared}, received {actual}")]
    LengthMismatch { declared: u64, actual: u64 },
    #[error("Invalid image reference: {0}")]
    InvalidReference(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("User error: {0}")]
    UserError(#[from] UserError),
    #[error("Profile error: {0}")]
    ProfileError(#[from] ProfileError),
    #[error("Recipe error: {0}")]
    RecipeError(#[from] RecipeError),

    #[error("IO failure: {0}")]
    IoFailure(String),
    #[error("Unknown error: {0}")]
    UnknownError(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::IoFailure(e.to_string())
    }
}
