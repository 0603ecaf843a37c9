use serde::{Deserialize, Serialize};

/// Contest rules which are not fixed by ICPC format
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// If enabled, submission from unknown team registers this team.
    /// Otherwise such submission fails with `Error::UnknownTeam`.
    #[serde(default)]
    pub auto_register: bool,
    /// Penalty minutes for each wrong attempt on solved problem
    #[serde(default = "default_penalty_per_wrong")]
    pub penalty_per_wrong: u32,
}

fn default_penalty_per_wrong() -> u32 {
    20
}

impl Default for Config {
    fn default() -> Self {
        Config {
            auto_register: false,
            penalty_per_wrong: default_penalty_per_wrong(),
        }
    }
}
