use std::env;

/// Runtime configuration, resolved once at startup and passed down
/// explicitly; nothing in the backend reads the environment after this.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database URL
    pub database_url: String,
    /// Address the HTTP server binds to
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to local
    /// development defaults
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:travel_agency.db".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
