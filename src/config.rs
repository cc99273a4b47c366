use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};

pub const DATA_DIR_ENV: &str = "ROSTER_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_CATEGORY: &str = "MI088";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub default_category: String,
    /// Reference time for "member since" phrases.
    pub as_of: DateTime<Utc>,
}

impl Config {
    pub fn from_env(
        data_dir: Option<PathBuf>,
        default_category: Option<String>,
        as_of: Option<NaiveDate>,
    ) -> Self {
        Self::resolve(
            data_dir,
            std::env::var(DATA_DIR_ENV).ok(),
            default_category,
            as_of,
            Utc::now(),
        )
    }

    /// Explicit arguments win over the environment, which wins over defaults.
    pub fn resolve(
        data_dir: Option<PathBuf>,
        env_data_dir: Option<String>,
        default_category: Option<String>,
        as_of: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Self {
        let data_dir = data_dir
            .or_else(|| env_data_dir.filter(|dir| !dir.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let as_of = as_of
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
            .unwrap_or(now);

        Self {
            data_dir,
            default_category: default_category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            as_of,
        }
    }
}
