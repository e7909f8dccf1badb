use std::{env, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr};

use book::CoverRule;
use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub client_dir: PathBuf,
    pub entry_document: String,
    pub production: bool,
    pub cover_rule: CoverRule,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_upload_preset: String,
    pub api_timeout_ms: u64,
    pub api_retry_attempts: u32,
}

impl Config {
    pub fn load() -> Self {
        let facing_shown: bool = try_load("SHOW_FACING_RIBBON", "false");

        Self {
            port: try_load("PORT", "3000"),
            client_dir: try_load::<String>("CLIENT_DIR", "client").into(),
            entry_document: try_load("ENTRY_DOCUMENT", "index.html"),
            production: try_load::<String>("APP_ENV", "development") == "production",
            cover_rule: if facing_shown {
                CoverRule::FacingShown
            } else {
                CoverRule::FacingHidden
            },
            supabase_url: var("SUPABASE_URL").ok(),
            supabase_key: read_secret("SUPABASE_PUBLISHABLE_KEY"),
            cloudinary_cloud_name: var("CLOUDINARY_CLOUD_NAME").ok(),
            cloudinary_upload_preset: try_load("CLOUDINARY_UPLOAD_PRESET", "travel-book"),
            api_timeout_ms: try_load("API_TIMEOUT_MS", "10000"),
            api_retry_attempts: try_load("API_RETRY_ATTEMPTS", "3"),
        }
    }

    /// Defaults only, for a client bundle served out of `client_dir`.
    pub fn with_client_dir(client_dir: impl Into<PathBuf>) -> Self {
        Self {
            port: 0,
            client_dir: client_dir.into(),
            entry_document: "index.html".to_string(),
            production: false,
            cover_rule: CoverRule::default(),
            supabase_url: None,
            supabase_key: None,
            cloudinary_cloud_name: None,
            cloudinary_upload_preset: "travel-book".to_string(),
            api_timeout_ms: 10_000,
            api_retry_attempts: 3,
        }
    }

    pub fn entry_path(&self) -> PathBuf {
        self.client_dir.join(&self.entry_document)
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
        })
        .ok()
}
