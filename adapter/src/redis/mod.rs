use redis::{AsyncCommands, Client};
use shared::{config::RedisConfig, error::AppResult};

pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    pub fn new(cfg: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(format!("redis://{}:{}", cfg.host, cfg.port))?;
        Ok(Self { client })
    }

    pub async fn set_ex(&self, key: &str, value: &str, ttl: u64) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl).await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn.get(key).await?)
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }
}
