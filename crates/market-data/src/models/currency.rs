use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// Currency a snapshot is priced in.
///
/// Parsed eagerly from user input so unsupported codes never reach the
/// upstream API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteCurrency {
    #[default]
    Usd,
    Btc,
    Inr,
    Eth,
    Eur,
    Jpy,
}

impl QuoteCurrency {
    pub const ALL: [QuoteCurrency; 6] = [
        QuoteCurrency::Usd,
        QuoteCurrency::Btc,
        QuoteCurrency::Inr,
        QuoteCurrency::Eth,
        QuoteCurrency::Eur,
        QuoteCurrency::Jpy,
    ];

    /// Lowercase code as sent in `vs_currency`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Btc => "btc",
            Self::Inr => "inr",
            Self::Eth => "eth",
            Self::Eur => "eur",
            Self::Jpy => "jpy",
        }
    }
}

impl fmt::Display for QuoteCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteCurrency {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == code)
            .ok_or_else(|| InputError::UnsupportedCurrency(s.to_string()))
    }
}
