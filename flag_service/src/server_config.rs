use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AccessControl {
    pub access_control_allow_headers: String,
    pub access_control_allow_methods: String,
}

impl Default for AccessControl {
    fn default() -> Self {
        AccessControl {
            access_control_allow_headers: "Content-Type, User-Agent, Authorization".to_string(),
            access_control_allow_methods: "GET, POST, OPTIONS".to_string(),
        }
    }
}

impl AccessControl {
    pub fn get_access_control_allow_headers(&self) -> Vec<String> {
        split_list(&self.access_control_allow_headers)
    }
    pub fn get_access_control_allow_methods(&self) -> Vec<String> {
        split_list(&self.access_control_allow_methods)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
