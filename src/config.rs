use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub session_ttl_minutes: i64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("AUTHGATE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid AUTHGATE_HOST: {e}"))?;

        let port: u16 = env_or("AUTHGATE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid AUTHGATE_PORT: {e}"))?;

        let session_ttl_minutes: i64 = env_or("AUTHGATE_SESSION_TTL_MINUTES", "15")
            .parse()
            .map_err(|e| format!("Invalid AUTHGATE_SESSION_TTL_MINUTES: {e}"))?;
        if session_ttl_minutes <= 0 {
            return Err("AUTHGATE_SESSION_TTL_MINUTES must be positive".to_string());
        }

        let log_level = env_or("AUTHGATE_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            session_ttl_minutes,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
