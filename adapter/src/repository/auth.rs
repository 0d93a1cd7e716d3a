use crate::{database::ConnectionPool, redis::RedisClient};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::auth::{event::CreateToken, AccessToken};
use kernel::model::id::UserId;
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::str::FromStr;
use std::sync::Arc;

fn auth_key(access_token: &str) -> String {
    format!("auth:token:{access_token}")
}

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let value = self.kv.get(&auth_key(&access_token.0)).await?;
        value.map(|v| UserId::from_str(&v)).transpose()
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let row: Option<(UserId, String)> = sqlx::query_as(
            r#"
                SELECT user_id, password_hash
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some((user_id, password_hash)) = row else {
            return Err(AppError::UnauthenticatedError);
        };

        let valid = bcrypt::verify(password, &password_hash)
            .map_err(|e| AppError::BcryptError(e.to_string()))?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }

        Ok(user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        self.kv
            .set_ex(
                &auth_key(&event.access_token),
                &event.user_id.to_string(),
                self.ttl,
            )
            .await?;
        Ok(AccessToken(event.access_token))
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        self.kv.delete(&auth_key(&access_token.0)).await
    }
}
