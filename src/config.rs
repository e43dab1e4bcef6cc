use anyhow::{anyhow, Result};

use crate::search::SolverMode;

pub const MODE_VAR: &str = "RICOCHET_MODE";
pub const THREADS_VAR: &str = "RICOCHET_THREADS";

/// Runtime settings for the solver binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub mode: SolverMode,
    pub threads: usize,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(mode) = lookup(MODE_VAR) {
            config.mode = SolverMode::try_from(mode.as_str())?;
        }

        if let Some(threads) = lookup(THREADS_VAR) {
            config.threads = threads
                .parse()
                .map_err(|_| anyhow!("Invalid {THREADS_VAR}: {threads}"))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod test_config {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.mode, SolverMode::Parallel);
        assert_eq!(config.threads, 0);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(|key| match key {
            MODE_VAR => Some("s".to_string()),
            THREADS_VAR => Some("3".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.mode, SolverMode::Sequential);
        assert_eq!(config.threads, 3);
    }

    #[test]
    fn test_invalid_threads() {
        let result = Config::from_lookup(|key| (key == THREADS_VAR).then(|| "many".to_string()));
        assert!(result.is_err());
    }
}
