use serde::{Deserialize, Serialize};

/// Configuration for the scheduling module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulingConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    #[serde(default = "default_max_notes_length")]
    pub max_notes_length: usize,
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            max_name_length: default_max_name_length(),
            max_notes_length: default_max_notes_length(),
            default_timezone: default_timezone(),
        }
    }
}

fn default_page_size() -> u32 {
    50
}

fn default_max_page_size() -> u32 {
    1000
}

fn default_max_name_length() -> usize {
    100
}

fn default_max_notes_length() -> usize {
    2000
}

fn default_timezone() -> String {
    "UTC".to_string()
}
