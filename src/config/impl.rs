use std::sync::{Arc, OnceLock};

use super::StaticConfig;

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Initialize the global configuration
///
/// Loads `path` (or "config.toml" in the current directory) overlaid with
/// `UM__*` environment variables. Later calls keep the first configuration.
///
/// # Examples
/// ```no_run
/// use urlmini::config::init_config;
/// init_config(None);
/// ```
pub fn init_config(path: Option<&str>) -> Arc<StaticConfig> {
    Arc::clone(CONFIG.get_or_init(|| Arc::new(StaticConfig::load(path))))
}
