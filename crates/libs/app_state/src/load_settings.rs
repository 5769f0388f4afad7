use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::path::Path;
use tracing::debug;

const SETTINGS_PATH: &str = "config/settings.yaml";

/// Loads `config/settings.yaml` relative to the working directory.
pub fn load_app_settings() -> Result<AppSettings> {
    load_settings_from_path(Path::new(SETTINGS_PATH))
}

/// Loads settings from a yaml file, with `APP__SECTION__KEY` environment
/// variables (and a `.env` file, if present) taking precedence.
pub fn load_settings_from_path(path: &Path) -> Result<AppSettings> {
    dotenv::from_path(".env").ok();
    let config_path = path.canonicalize()?;
    debug!("Loading settings from {}", config_path.display());

    let raw_settings = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<RawSettings>()?;

    AppSettings::try_from(raw_settings)
}
