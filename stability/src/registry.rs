use crate::server_config::StabilityConfig;
use common::{Endpoint, NetworkClass};
use log::info;
use std::collections::HashSet;
use thiserror::Error;

const DEFAULT_ENDPOINTS: [(&str, &str, NetworkClass); 8] = [
    ("TestNet-1", "https://testnet1.neo.coz.io:443", NetworkClass::Test),
    ("TestNet-2", "https://testnet2.neo.coz.io:443", NetworkClass::Test),
    ("TestNet-3", "https://testnet3.neo.coz.io:443", NetworkClass::Test),
    ("TestNet-4", "https://testnet4.neo.coz.io:443", NetworkClass::Test),
    ("TestNet-5", "https://testnet5.neo.coz.io:443", NetworkClass::Test),
    ("MainNet-1", "https://mainnet1.neo.coz.io:443", NetworkClass::Main),
    ("MainNet-2", "https://mainnet2.neo.coz.io:443", NetworkClass::Main),
    ("MainNet-3", "https://mainnet3.neo.coz.io:443", NetworkClass::Main),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("endpoint registry is empty")]
    Empty,
    #[error("duplicate endpoint name {0}")]
    DuplicateName(String),
}

/// Ordered, immutable list of endpoints under test. Report order follows this order.
#[derive(Clone, Debug, PartialEq)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
}

impl EndpointRegistry {
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self, RegistryError> {
        if endpoints.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut names = HashSet::new();
        for endpoint in endpoints.iter() {
            if !names.insert(endpoint.name.as_str()) {
                return Err(RegistryError::DuplicateName(endpoint.name.clone()));
            }
        }
        Ok(EndpointRegistry { endpoints })
    }

    pub fn from_config(config: &StabilityConfig) -> Result<Self, RegistryError> {
        if config.endpoints.is_empty() {
            info!("No endpoint configured, using the built-in registry");
            return Ok(EndpointRegistry::default());
        }
        EndpointRegistry::new(config.endpoints.clone())
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

}

impl Default for EndpointRegistry {
    fn default() -> Self {
        EndpointRegistry {
            endpoints: DEFAULT_ENDPOINTS
                .iter()
                .map(|(name, address, network_class)| Endpoint::new(name, address, *network_class))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let registry = EndpointRegistry::default();
        let endpoints = registry.endpoints();
        assert_eq!(endpoints.len(), 8);
        assert_eq!(endpoints[0].name, "TestNet-1");
        assert_eq!(
            endpoints[6],
            Endpoint::new("MainNet-2", "https://mainnet2.neo.coz.io:443", NetworkClass::Main)
        );
        assert_eq!(
            endpoints
                .iter()
                .filter(|endpoint| endpoint.network_class == NetworkClass::Test)
                .count(),
            5
        );
        // Built-in names are unique.
        assert!(EndpointRegistry::new(registry.endpoints().to_vec()).is_ok());
    }

    #[test]
    fn test_registry_rejects_bad_lists() {
        assert_eq!(EndpointRegistry::new(vec![]), Err(RegistryError::Empty));
        let endpoint = Endpoint::new("Node", "http://127.0.0.1:1", NetworkClass::Main);
        assert_eq!(
            EndpointRegistry::new(vec![endpoint.clone(), endpoint]),
            Err(RegistryError::DuplicateName("Node".to_string()))
        );
    }

    #[test]
    fn test_registry_from_config() {
        let config = StabilityConfig::default();
        assert_eq!(
            EndpointRegistry::from_config(&config).unwrap(),
            EndpointRegistry::default()
        );
        let config = StabilityConfig {
            endpoints: vec![Endpoint::new("Only", "http://localhost:1", NetworkClass::Main)],
            ..Default::default()
        };
        let registry = EndpointRegistry::from_config(&config).unwrap();
        assert_eq!(registry.endpoints().len(), 1);
        assert_eq!(registry.endpoints()[0].name, "Only");
    }
}
