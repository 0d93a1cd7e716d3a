use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub flight_provider: FlightProviderConfig,
}

impl AppConfig {
    pub fn new() -> Result<AppConfig> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse()?,
        };
        let auth = AuthConfig {
            ttl: std::env::var("AUTH_TOKEN_TTL")?.parse()?,
        };
        let flight_provider = FlightProviderConfig {
            base_url: std::env::var("FLIGHT_PROVIDER_BASE_URL")?,
            api_key: std::env::var("FLIGHT_PROVIDER_API_KEY")?,
        };
        Ok(Self {
            database,
            redis,
            auth,
            flight_provider,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    pub ttl: u64,
}

pub struct FlightProviderConfig {
    pub base_url: String,
    pub api_key: String,
}
