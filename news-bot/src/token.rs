//! Callback tokens carried by inline buttons.
//!
//! Wire forms: `country:<name>`, `news:<id>`, `more:<offset>`. Tokens are not signed; any client
//! can send any payload, so every argument is validated here before it reaches the catalog.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const COUNTRY: &str = "country";
const NEWS: &str = "news";
const MORE: &str = "more";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackToken {
    Country(String),
    NewsDetail(u32),
    More(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Not one of ours. Ignored without logging noise.
    #[error("unknown callback prefix: {0:?}")]
    UnknownPrefix(String),

    /// Known prefix with an argument that does not parse.
    #[error("invalid {prefix} callback argument: {arg:?}")]
    Invalid { prefix: &'static str, arg: String },
}

impl CallbackToken {
    pub fn encode(&self) -> String {
        self.to_string()
    }

    pub fn parse(data: &str) -> Result<Self, TokenError> {
        let (prefix, arg) = data
            .split_once(':')
            .ok_or_else(|| TokenError::UnknownPrefix(data.to_string()))?;

        match prefix {
            COUNTRY => {
                if arg.trim().is_empty() {
                    return Err(invalid(COUNTRY, arg));
                }
                Ok(CallbackToken::Country(arg.to_string()))
            }
            NEWS => match arg.parse::<u32>() {
                Ok(id) if id >= 1 => Ok(CallbackToken::NewsDetail(id)),
                _ => Err(invalid(NEWS, arg)),
            },
            MORE => arg
                .parse::<usize>()
                .map(CallbackToken::More)
                .map_err(|_| invalid(MORE, arg)),
            other => Err(TokenError::UnknownPrefix(other.to_string())),
        }
    }
}

fn invalid(prefix: &'static str, arg: &str) -> TokenError {
    TokenError::Invalid {
        prefix,
        arg: arg.to_string(),
    }
}

impl fmt::Display for CallbackToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackToken::Country(name) => write!(f, "{}:{}", COUNTRY, name),
            CallbackToken::NewsDetail(id) => write!(f, "{}:{}", NEWS, id),
            CallbackToken::More(offset) => write!(f, "{}:{}", MORE, offset),
        }
    }
}

impl FromStr for CallbackToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
