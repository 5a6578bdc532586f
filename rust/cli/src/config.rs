use gamemaster_engine::blackjack::BlackjackRewards;
use gamemaster_engine::master::DEFAULT_MAX_TURNS;
use gamemaster_engine::poker::PokerRewards;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "GAMEMASTER_CONFIG";
pub const SEED_ENV: &str = "GAMEMASTER_SEED";
pub const MAX_TURNS_ENV: &str = "GAMEMASTER_MAX_TURNS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub max_turns: usize,
    pub blackjack: BlackjackRewards,
    pub poker: PokerRewards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub max_turns: ValueSource,
    pub blackjack: ValueSource,
    pub poker: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            max_turns: ValueSource::Default,
            blackjack: ValueSource::Default,
            poker: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            max_turns: DEFAULT_MAX_TURNS,
            blackjack: BlackjackRewards::default(),
            poker: PokerRewards::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Defaults, then the TOML file named by `GAMEMASTER_CONFIG`, then
/// `GAMEMASTER_SEED` and `GAMEMASTER_MAX_TURNS`. Later layers win.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.max_turns {
            cfg.max_turns = v;
            sources.max_turns = ValueSource::File;
        }
        if let Some(v) = f.blackjack {
            cfg.blackjack = v;
            sources.blackjack = ValueSource::File;
        }
        if let Some(v) = f.poker {
            cfg.poker = v;
            sources.poker = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(turns) = std::env::var(MAX_TURNS_ENV)
        && !turns.is_empty()
    {
        cfg.max_turns = turns
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid max_turns: {}", turns)))?;
        sources.max_turns = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    max_turns: Option<usize>,
    #[serde(default)]
    blackjack: Option<BlackjackRewards>,
    #[serde(default)]
    poker: Option<PokerRewards>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.max_turns == 0 {
        return Err(ConfigError::Invalid(
            "max_turns must be >=1".into(),
        ));
    }
    let penalties = [
        ("blackjack.lose", cfg.blackjack.lose),
        ("blackjack.bust", cfg.blackjack.bust),
        ("blackjack.invalid", cfg.blackjack.invalid),
        ("poker.loss", cfg.poker.loss),
        ("poker.invalid", cfg.poker.invalid),
        ("poker.fold", cfg.poker.fold),
    ];
    if let Some((name, value)) = penalties.iter().find(|(_, v)| *v > 0.0) {
        return Err(ConfigError::Invalid(format!(
            "{} must be <=0, got {}",
            name, value
        )));
    }
    if cfg.poker.bet_amount <= 0.0 {
        return Err(ConfigError::Invalid(
            "poker.bet_amount must be >0".into(),
        ));
    }
    Ok(())
}
