use std::env;

/// Runtime configuration, read once at startup after `.env` is loaded.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: i64,
    pub resend_api_key: String,
    pub resend_from_email: String,
    pub host: String,
    pub port: String,
}

impl Settings {
    /// Reads settings from the environment.
    ///
    /// `DATABASE_URL`, `JWT_SECRET`, `RESEND_API_KEY` and
    /// `RESEND_FROM_EMAIL` are required; the rest have defaults.
    pub fn from_env() -> Result<Self, String> {
        let jwt_expiration_minutes = match env::var("JWT_EXPIRATION_MINUTES") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|_| format!("JWT_EXPIRATION_MINUTES must be an integer, got '{}'", raw))?,
            Err(_) => 60,
        };

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            jwt_secret: require("JWT_SECRET")?,
            jwt_expiration_minutes,
            resend_api_key: require("RESEND_API_KEY")?,
            resend_from_email: require("RESEND_FROM_EMAIL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "8000".to_string()),
        })
    }

    /// Bind address for the HTTP listener.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn require(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("{} must be set", name))
}
