pub mod feeds;

pub use feeds::{load_feeds, resolve_feeds_path};

use crate::errors::{FeederError, FeederResult};

/// Credentials and endpoint for the Notion database records are mirrored into
#[derive(Debug, Clone)]
pub struct Config {
    pub notion_url: String,
    pub notion_token: String,
    pub notion_database_id: String,
}

impl Config {
    /// Get the directory where the executable is located
    pub(crate) fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Load `.env` from the executable's directory first, then from the current directory
    pub fn load_dotenv() {
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        dotenvy::dotenv().ok();
    }

    pub fn from_env() -> FeederResult<Self> {
        Self::load_dotenv();

        let notion_token = required_var("NOTION_TOKEN")?;
        let notion_database_id = required_var("NOTION_DATABASE_ID")?;

        let notion_url = std::env::var("NOTION_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| notion::DEFAULT_API_URL.to_string());

        Ok(Self {
            notion_url,
            notion_token,
            notion_database_id,
        })
    }
}

fn required_var(name: &str) -> FeederResult<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| FeederError::MissingEnvVar(name.to_string()))
}
