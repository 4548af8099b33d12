use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://supreme.justia.com";
pub const DEFAULT_MAX_PAUSE_SECS: u64 = 5;

/// Runtime settings: defaults, then `justia_grabber.toml`, then `JUSTIA_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub max_pause_secs: u64,
    pub user_agent: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_pause_secs: DEFAULT_MAX_PAUSE_SECS,
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("justia_grabber").required(false))
                .add_source(Environment::with_prefix("JUSTIA").try_parsing(true)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let defaults = Settings::default();
        let settings = builder
            .set_default("base_url", defaults.base_url)?
            .set_default("max_pause_secs", defaults.max_pause_secs)?
            .set_default("user_agent", defaults.user_agent)?
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }

    /// Listing page for one year of decisions.
    pub fn year_url(&self, year: i32) -> String {
        format!(
            "{}/cases/federal/us/year/{}.html",
            self.base_url.trim_end_matches('/'),
            year
        )
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
