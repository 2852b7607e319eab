use crate::{EndpointName, UrlType};
use crate::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/*
 * Grouping label used to rank endpoints against their peers: a test network endpoint is
 * never recommended in place of a production one. Deserialization goes through the
 * case-insensitive `FromStr`, so both `mainnet` and the printed `MainNet` are accepted.
 */
#[derive(
    Clone, Copy, Debug, Deserialize, Serialize, Hash, PartialEq, Eq, PartialOrd, Ord, EnumString, Display,
)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum NetworkClass {
    #[serde(rename = "test")]
    #[strum(to_string = "TestNet", serialize = "test", serialize = "testnet")]
    Test,
    #[serde(rename = "main")]
    #[strum(to_string = "MainNet", serialize = "main", serialize = "mainnet")]
    Main,
}

impl TryFrom<String> for NetworkClass {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NetworkClass::from_str(&value).map_err(|_| {
            format!(
                "unknown network class `{}`, expected test, testnet, main or mainnet",
                value
            )
        })
    }
}

/// A named JSON-RPC service instance under test. The name is the identity.
#[derive(Clone, Debug, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct Endpoint {
    pub name: EndpointName,
    pub address: UrlType,
    pub network_class: NetworkClass,
}

impl Endpoint {
    pub fn new(name: &str, address: &str, network_class: NetworkClass) -> Self {
        Endpoint {
            name: name.to_string(),
            address: address.to_string(),
            network_class,
        }
    }
}
