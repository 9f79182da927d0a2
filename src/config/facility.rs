use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerSettings,
    pub facility: FacilitySettings,
    #[serde(default)]
    pub billing: BillingSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FacilitySettings {
    /// Scopes local charge staging; two facilities never share staged data.
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BillingSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₱".to_string()
}
