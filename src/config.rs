use dotenv::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub db_max_connections: u32,
    pub default_page_limit: i64,
    pub max_page_limit: i64,
}

impl Config {
    /// Environment-driven configuration. Malformed values fall back to
    /// defaults rather than aborting startup.
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:wallet_ledger.db".to_string());
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);
        let default_page_limit = env::var("DEFAULT_PAGE_LIMIT")
            .unwrap_or_else(|_| "50".to_string())
            .parse()
            .unwrap_or(50);
        let max_page_limit = env::var("MAX_PAGE_LIMIT")
            .unwrap_or_else(|_| "500".to_string())
            .parse()
            .unwrap_or(500);

        Self {
            database_url,
            server_host,
            server_port,
            db_max_connections,
            default_page_limit,
            max_page_limit,
        }
    }
}
