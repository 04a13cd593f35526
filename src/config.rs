use std::env;

const TOKEN_VAR: &str = "TELOXIDE_TOKEN";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{0} is empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first if a
    /// `.env` file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup(TOKEN_VAR).ok_or(ConfigError::Missing(TOKEN_VAR))?;
        if bot_token.trim().is_empty() {
            return Err(ConfigError::Empty(TOKEN_VAR));
        }
        Ok(Self { bot_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_token() {
        let config = Config::from_lookup(|key| {
            (key == "TELOXIDE_TOKEN").then(|| "123:abc".to_string())
        })
        .unwrap();
        assert_eq!(config.bot_token, "123:abc");
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        assert_eq!(err, ConfigError::Missing("TELOXIDE_TOKEN"));
    }

    #[test]
    fn blank_token_is_an_error() {
        let err = Config::from_lookup(|_| Some("  ".to_string())).unwrap_err();
        assert_eq!(err, ConfigError::Empty("TELOXIDE_TOKEN"));
    }
}
