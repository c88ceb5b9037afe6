use std::path::Path;

use crate::ClientResult;
use crate::config::load_config;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ConfigData;

pub fn run(config_path: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let loaded = load_config(config_path)?;
    let data = ConfigData {
        origin: loaded.origin.as_str().to_string(),
        path: loaded.path.as_ref().map(|path| path.display().to_string()),
        config: loaded.config,
    };

    success("config", data)
}
