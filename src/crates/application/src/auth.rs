use std::collections::HashMap;
use std::sync::Arc;

use crate::command::shared::IdGenerator;
use crate::error::AppError;
use domain::profile::{UserProfile, UserProfileRepository};
use domain::user::{User, UserRepository};
use domain::value::UserId;

/// 盐值哈希对：摘要与生成它的盐，两者都以 hex 存储
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltedHash {
    pub hash: String,
    pub salt: String,
}

/// 注册时的默认盐长度（字节）
pub const DEFAULT_SALT_LENGTH: usize = 32;

/// 盐值哈希服务
///
/// 纯函数，无失败路径。`salt_length` 为 0 属编程错误，实现应当 panic。
pub trait HashingService: Send + Sync {
    fn generate_salted_hash(&self, secret: &str, salt_length: usize) -> SaltedHash;

    /// 常数时间校验，凭证不匹配返回 false 而不是错误
    fn verify(&self, secret: &str, stored: &SaltedHash) -> bool;
}

/// 令牌中的单个声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaim {
    pub name: String,
    pub value: String,
}

impl TokenClaim {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// 登录令牌携带的主体声明，鉴权中间件按它解析请求身份
pub const USER_ID_CLAIM: &str = "userId";

/// 令牌配置，进程启动时装载一次，之后不可变
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub issuer: String,
    pub audience: String,
    pub expires_in_millis: i64,
    pub secret: String,
}

impl TokenConfig {
    /// 启动期校验。配置错误是致命的，不进入每次调用的错误路径。
    pub fn validate(&self) -> Result<(), AppError> {
        if self.secret.is_empty() {
            return Err(AppError::AuthError("token secret is empty".to_string()));
        }
        if self.expires_in_millis <= 0 {
            return Err(AppError::AuthError(format!(
                "token expiry must be positive, got {}",
                self.expires_in_millis
            )));
        }
        Ok(())
    }
}

/// 签名令牌服务
pub trait TokenService: Send + Sync {
    /// 签发携带给定声明的令牌
    fn generate(&self, claims: &[TokenClaim]) -> Result<String, AppError>;

    /// 校验令牌并返回其声明
    fn verify(&self, token: &str) -> Result<HashMap<String, String>, AppError>;
}

/// 注册 / 登录服务
#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    profile_repo: Arc<dyn UserProfileRepository>,
    hasher: Arc<dyn HashingService>,
    token_svc: Arc<dyn TokenService>,
    id_generator: Arc<dyn IdGenerator>,
    salt_length: usize,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        profile_repo: Arc<dyn UserProfileRepository>,
        hasher: Arc<dyn HashingService>,
        token_svc: Arc<dyn TokenService>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            user_repo,
            profile_repo,
            hasher,
            token_svc,
            id_generator,
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }

    pub fn with_salt_length(mut self, salt_length: usize) -> Self {
        self.salt_length = salt_length;
        self
    }

    /// 注册新账号并创建空白资料
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<(), AppError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::Conflict("email is already used".to_string()));
        }

        let salted = self.hasher.generate_salted_hash(password, self.salt_length);
        let id = UserId::from(self.id_generator.next_id().await?);
        let user = User::new(id.clone(), name, email, &salted.hash, &salted.salt);

        self.user_repo.insert(&user).await?;
        self.profile_repo
            .create(&UserProfile::new(id, name))
            .await?;
        log::info!("new account registered: {}", user.id);
        Ok(())
    }

    /// 校验邮箱口令，签发携带 userId 声明的令牌
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("user with the given email doesn't exist".to_string())
            })?;

        let stored = SaltedHash {
            hash: user.password_hash.clone(),
            salt: user.salt.clone(),
        };
        if !self.hasher.verify(password, &stored) {
            return Err(AppError::AuthError("invalid password".to_string()));
        }

        self.token_svc
            .generate(&[TokenClaim::new(USER_ID_CLAIM, user.id.to_string())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use domain::profile::ProfileError;
    use domain::user::UserError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeUserRepo {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn count(&self) -> Result<u64, UserError> {
            Ok(self.users.lock().unwrap().len() as u64)
        }
        async fn find_by_email<'a>(&'a self, email: &'a str) -> Result<Option<User>, UserError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }
        async fn find_by_id<'a>(&'a self, id: UserId) -> Result<Option<User>, UserError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == id)
                .cloned())
        }
        async fn insert<'a>(&'a self, user: &User) -> Result<(), UserError> {
            self.users.lock().unwrap().push(user.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeProfileRepo {
        profiles: Mutex<Vec<UserProfile>>,
    }

    #[async_trait]
    impl UserProfileRepository for FakeProfileRepo {
        async fn find_by_user_id(
            &self,
            user_id: UserId,
        ) -> Result<Option<UserProfile>, ProfileError> {
            Ok(self
                .profiles
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.user_id == user_id)
                .cloned())
        }
        async fn create(&self, profile: &UserProfile) -> Result<(), ProfileError> {
            self.profiles.lock().unwrap().push(profile.clone());
            Ok(())
        }
        async fn update(&self, _profile: &UserProfile) -> Result<(), ProfileError> {
            Ok(())
        }
    }

    /// Reversible "hash" good enough for wiring tests
    struct FakeHasher;

    impl HashingService for FakeHasher {
        fn generate_salted_hash(&self, secret: &str, _salt_length: usize) -> SaltedHash {
            SaltedHash {
                hash: format!("hashed:{}", secret),
                salt: "salt".to_string(),
            }
        }
        fn verify(&self, secret: &str, stored: &SaltedHash) -> bool {
            stored.hash == format!("hashed:{}", secret)
        }
    }

    struct FakeTokenService;

    impl TokenService for FakeTokenService {
        fn generate(&self, claims: &[TokenClaim]) -> Result<String, AppError> {
            Ok(claims
                .iter()
                .map(|c| format!("{}={}", c.name, c.value))
                .collect::<Vec<_>>()
                .join(";"))
        }
        fn verify(&self, token: &str) -> Result<HashMap<String, String>, AppError> {
            Ok(token
                .split(';')
                .filter_map(|p| p.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect())
        }
    }

    struct SeqIdGenerator(Mutex<i64>);

    #[async_trait]
    impl IdGenerator for SeqIdGenerator {
        async fn next_id(&self) -> Result<i64, AppError> {
            let mut n = self.0.lock().unwrap();
            *n += 1;
            Ok(*n)
        }
    }

    fn service() -> (AuthService, Arc<FakeUserRepo>, Arc<FakeProfileRepo>) {
        let user_repo = Arc::new(FakeUserRepo::default());
        let profile_repo = Arc::new(FakeProfileRepo::default());
        let svc = AuthService::new(
            user_repo.clone(),
            profile_repo.clone(),
            Arc::new(FakeHasher),
            Arc::new(FakeTokenService),
            Arc::new(SeqIdGenerator(Mutex::new(0))),
        );
        (svc, user_repo, profile_repo)
    }

    #[tokio::test]
    async fn test_sign_up_creates_user_and_profile() {
        let (svc, users, profiles) = service();
        svc.sign_up("Anna", "anna@example.com", "Password1")
            .await
            .unwrap();

        assert_eq!(users.count().await.unwrap(), 1);
        let stored = users
            .find_by_email("anna@example.com")
            .await
            .unwrap()
            .unwrap();
        // never the plaintext
        assert_ne!(stored.password_hash, "Password1");
        assert_eq!(profiles.profiles.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email_conflicts() {
        let (svc, _, _) = service();
        svc.sign_up("Anna", "anna@example.com", "Password1")
            .await
            .unwrap();
        let err = svc
            .sign_up("Other", "anna@example.com", "Password2")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_login_issues_token_with_user_id_claim() {
        let (svc, users, _) = service();
        svc.sign_up("Anna", "anna@example.com", "Password1")
            .await
            .unwrap();
        let token = svc.login("anna@example.com", "Password1").await.unwrap();

        let id = users
            .find_by_email("anna@example.com")
            .await
            .unwrap()
            .unwrap()
            .id;
        let claims = FakeTokenService.verify(&token).unwrap();
        assert_eq!(claims.get(USER_ID_CLAIM), Some(&id.to_string()));
    }

    #[tokio::test]
    async fn test_login_wrong_password_fails() {
        let (svc, _, _) = service();
        svc.sign_up("Anna", "anna@example.com", "Password1")
            .await
            .unwrap();
        let err = svc
            .login("anna@example.com", "WrongPassword1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_fails() {
        let (svc, _, _) = service();
        let err = svc
            .login("nobody@example.com", "Password1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
