use anyhow::{anyhow, Error};
use log::info;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub trait LoadConfig<T: DeserializeOwned + Debug> {
    fn load_config(path: &str) -> Result<T, Error> {
        let json = std::fs::read_to_string(path)
            .map_err(|err| anyhow!("Unable to read config file `{}`: {}", path, err))?;
        let config: T = serde_json::from_str(&json)
            .map_err(|err| anyhow!("Unable to parse config file `{}`: {}", path, err))?;
        info!("Loaded config: {:#?} from {}", config, path);
        Ok(config)
    }
}
