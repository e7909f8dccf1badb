//! # Client Constants
//!
//! Values the client bundle consumes as-is. Nothing on the server computes with them, they are
//! only handed out through `/api/config`.
use serde::Serialize;

use crate::config::Config;

#[derive(Serialize)]
pub struct ApiConfig {
    pub tables: Tables,
    pub cloudinary: CloudinaryLimits,
    pub pagination: Pagination,
    pub cache: Cache,
    pub map: MapZoom,
}

#[derive(Serialize)]
pub struct Tables {
    pub markers: &'static str,
    pub cities: &'static str,
    pub countries: &'static str,
    pub regions: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudinaryLimits {
    pub folder: &'static str,
    pub max_file_size: u64,
    pub allowed_formats: &'static [&'static str],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

/// Expirations in milliseconds.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cache {
    pub cities_expiry: u64,
    pub countries_expiry: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapZoom {
    pub default_zoom: u8,
    pub max_zoom: u8,
    pub min_zoom: u8,
}

pub static API_CONFIG: ApiConfig = ApiConfig {
    tables: Tables {
        markers: "markers",
        cities: "cities",
        countries: "countries",
        regions: "regions",
    },
    cloudinary: CloudinaryLimits {
        folder: "travel-book",
        max_file_size: 10 * 1024 * 1024,
        allowed_formats: &["jpg", "jpeg", "png", "webp", "gif"],
    },
    pagination: Pagination {
        default_page_size: 20,
        max_page_size: 100,
    },
    cache: Cache {
        cities_expiry: 24 * 60 * 60 * 1000,
        countries_expiry: 7 * 24 * 60 * 60 * 1000,
    },
    map: MapZoom {
        default_zoom: 2,
        max_zoom: 18,
        min_zoom: 1,
    },
};

/// Local storage keys.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageKeys {
    pub markers: &'static str,
    pub map_state: &'static str,
    pub bookmarks: &'static str,
    pub last_sync: &'static str,
    pub user_preferences: &'static str,
}

pub static STORAGE_KEYS: StorageKeys = StorageKeys {
    markers: "travel_book_markers",
    map_state: "travel_book_map_state",
    bookmarks: "travel_book_bookmarks",
    last_sync: "travel_book_last_sync",
    user_preferences: "travel_book_user_preferences",
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessages {
    pub network: &'static str,
    pub timeout: &'static str,
    pub unauthorized: &'static str,
    pub not_found: &'static str,
    pub server_error: &'static str,
    pub upload_failed: &'static str,
    pub invalid_format: &'static str,
    pub file_too_large: &'static str,
}

pub static ERROR_MESSAGES: ErrorMessages = ErrorMessages {
    network: "Network error. Please check your connection.",
    timeout: "Request timed out. Please try again.",
    unauthorized: "Unauthorized access. Please log in.",
    not_found: "Resource not found.",
    server_error: "Server error. Please try again later.",
    upload_failed: "Failed to upload image. Please try again.",
    invalid_format: "Invalid file format.",
    file_too_large: "File size exceeds maximum limit.",
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub production: bool,
    pub supabase: Supabase,
    pub cloudinary: Cloudinary,
    pub api: Api,
    pub constants: &'static ApiConfig,
    pub storage_keys: &'static StorageKeys,
    pub error_messages: &'static ErrorMessages,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Supabase {
    pub url: Option<String>,
    pub publishable_key: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cloudinary {
    pub cloud_name: Option<String>,
    pub upload_preset: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Api {
    pub timeout: u64,
    pub retry_attempts: u32,
}

impl ClientConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            production: config.production,
            supabase: Supabase {
                url: config.supabase_url.clone(),
                publishable_key: config.supabase_key.clone(),
            },
            cloudinary: Cloudinary {
                cloud_name: config.cloudinary_cloud_name.clone(),
                upload_preset: config.cloudinary_upload_preset.clone(),
            },
            api: Api {
                timeout: config.api_timeout_ms,
                retry_attempts: config.api_retry_attempts,
            },
            constants: &API_CONFIG,
            storage_keys: &STORAGE_KEYS,
            error_messages: &ERROR_MESSAGES,
        }
    }
}
