use anyhow::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { dir: "data".into() }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SplitConfig {
    pub test_fraction: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { test_fraction: 0.2 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlsConfig {
    pub factors: usize,
    pub iterations: usize,
    pub regularization: f64,
}

impl Default for AlsConfig {
    fn default() -> Self {
        Self {
            factors: 10,
            iterations: 10,
            regularization: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixing the seed makes the split and the fit reproducible; leaving it
    /// unset reseeds from entropy on every run.
    pub seed: Option<u64>,
    pub split: SplitConfig,
    pub als: AlsConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub engine: EngineConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let parsed: Self = toml::from_str(&contents)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;

    #[test]
    fn load_example_config() -> Result<(), Error> {
        let expected = Config {
            data: DataConfig { dir: "data".into() },
            engine: EngineConfig {
                seed: Some(42),
                split: SplitConfig { test_fraction: 0.2 },
                als: AlsConfig {
                    factors: 10,
                    iterations: 10,
                    regularization: 0.1,
                },
            },
        };

        let loaded = Config::load("example.toml")?;
        assert_eq!(expected, loaded);

        Ok(())
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() -> Result<(), Error> {
        let parsed: Config = toml::from_str("[engine.als]\nfactors = 4\n")?;

        assert_eq!(parsed.data, DataConfig::default());
        assert_eq!(parsed.engine.seed, None);
        assert_eq!(parsed.engine.als.factors, 4);
        assert_eq!(parsed.engine.als.iterations, 10);

        Ok(())
    }
}
