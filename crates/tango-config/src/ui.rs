use serde::{Deserialize, Serialize};

fn default_show_progress() -> bool {
    true
}

fn default_prompt() -> String {
    "tango> ".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_progress: default_show_progress(),
            prompt: default_prompt(),
        }
    }
}
