//! Loading `DispatchConfig` from JSON.
//!
//! Every field is optional; missing ones keep their defaults.
//!
//! ```json
//! { "value_weight": 0.5, "time_weight": 0.5, "value_bucket": 100 }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use dd_core::DispatchConfig;
use dd_engine::EngineError;

use crate::DriverResult;

pub fn load_config_path(path: &Path) -> DriverResult<DispatchConfig> {
    let file = File::open(path)?;
    load_config_reader(BufReader::new(file))
}

/// Parse and validate a config from any `Read` source.
pub fn load_config_reader<R: Read>(reader: R) -> DriverResult<DispatchConfig> {
    let config: DispatchConfig = serde_json::from_reader(reader)?;
    config.validate().map_err(EngineError::from)?;
    Ok(config)
}
