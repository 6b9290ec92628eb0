use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Dev,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            _ => Self::Dev,
        }
    }

    /// Returns the default data path for this environment
    pub fn default_data_path(&self) -> PathBuf {
        match self {
            Self::Dev => PathBuf::from("./data"),
            Self::Prod => PathBuf::from("/data"),
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub env: Environment,
    pub data_path: PathBuf,
    pub database_url: String,
    pub max_connections: u32,

    /// How many feeds one ingestion cycle may fetch in parallel; also
    /// the batch size of a cycle. Fixed for the process lifetime.
    pub fetch_concurrency: usize,
    /// Wall-clock interval between ingestion cycles. Fixed for the
    /// process lifetime.
    pub fetch_interval: Duration,
}

impl Config {
    pub fn new(
        env: Environment,
        data_path: impl AsRef<Path>,
        fetch_concurrency: usize,
        fetch_interval: Duration,
    ) -> Self {
        let data_path = data_path.as_ref().to_path_buf();
        let database_url = format!(
            "sqlite:{}?mode=rwc",
            data_path.join("feedhive.db").display()
        );

        Self {
            env,
            data_path,
            database_url,
            max_connections: 5,
            fetch_concurrency,
            fetch_interval,
        }
    }
}
