//! Shop settings read from the environment.

use std::env;

use thiserror::Error;

const DEFAULT_STORE_NAME: &str = "Essenciarabe";
const DEFAULT_MERCHANT_NAME: &str = "Hector";
const DEFAULT_CATALOG_CSV_PATH: &str = "perfumes.csv";
const DEFAULT_CATALOG_HUB_ID: i32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("{name} has an invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

/// Settings used when composing checkout messages and syncing the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopConfig {
    /// Merchant WhatsApp number that receives order messages.
    pub whatsapp_phone_number: String,
    /// Shop name shown in the message header.
    pub store_name: String,
    /// Name used to greet the merchant.
    pub merchant_name: String,
    /// Catalog file synced on startup when present.
    pub catalog_csv_path: String,
    /// Hub that owns the startup catalog sync.
    pub catalog_hub_id: i32,
}

impl ShopConfig {
    pub fn new(whatsapp_phone_number: impl Into<String>) -> Self {
        Self {
            whatsapp_phone_number: whatsapp_phone_number.into(),
            store_name: DEFAULT_STORE_NAME.to_string(),
            merchant_name: DEFAULT_MERCHANT_NAME.to_string(),
            catalog_csv_path: DEFAULT_CATALOG_CSV_PATH.to_string(),
            catalog_hub_id: DEFAULT_CATALOG_HUB_ID,
        }
    }

    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let phone = env::var("WHATSAPP_PHONE_NUMBER")
            .map_err(|_| ConfigError::Missing("WHATSAPP_PHONE_NUMBER"))?;

        let mut config = ShopConfig::new(phone);

        if let Ok(store_name) = env::var("STORE_NAME") {
            config.store_name = store_name;
        }
        if let Ok(merchant_name) = env::var("MERCHANT_NAME") {
            config.merchant_name = merchant_name;
        }
        if let Ok(path) = env::var("CATALOG_CSV_PATH") {
            config.catalog_csv_path = path;
        }
        if let Ok(value) = env::var("CATALOG_HUB_ID") {
            config.catalog_hub_id = value.parse().map_err(|_| ConfigError::Invalid {
                name: "CATALOG_HUB_ID",
                value,
            })?;
        }

        Ok(config)
    }
}
