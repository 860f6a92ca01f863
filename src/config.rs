use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// PostgreSQL connection string; `None` runs the in-memory store
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub allowed_origins: Vec<String>,
    pub upload_dir: PathBuf,
    /// Base used to build the URLs returned by the upload endpoint
    pub public_base_url: String,
    pub max_upload_bytes: usize,
    pub bcrypt_cost: u32,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| "Invalid DATABASE_MAX_CONNECTIONS")?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let upload_dir = env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "./uploads".to_string())
            .into();

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", server_port))
            .trim_end_matches('/')
            .to_string();

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "5242880".to_string())
            .parse()
            .map_err(|_| "Invalid MAX_UPLOAD_BYTES")?;

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| "Invalid BCRYPT_COST")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            server_host,
            server_port,
            database_url,
            database_max_connections,
            allowed_origins,
            upload_dir,
            public_base_url,
            max_upload_bytes,
            bcrypt_cost,
            environment,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Public URL under which an uploaded file named `file_name` is served
    pub fn upload_url(&self, file_name: &str) -> String {
        format!(
            "{}{}/{}",
            self.public_base_url,
            crate::constants::UPLOADS_PATH,
            file_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_url() {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            database_url: None,
            database_max_connections: 1,
            allowed_origins: vec![],
            upload_dir: "./uploads".into(),
            public_base_url: "http://localhost:3000".to_string(),
            max_upload_bytes: 1024,
            bcrypt_cost: 4,
            environment: "test".to_string(),
        };

        assert_eq!(config.server_address(), "127.0.0.1:3000");
        assert_eq!(
            config.upload_url("1700000000000.png"),
            "http://localhost:3000/uploads/1700000000000.png"
        );
    }
}
