use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::fare::Price;
use crate::CoreError;

/// Currency used when rendering amounts.
///
/// Purely cosmetic: amounts are never converted, only labelled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisplayCurrency {
    #[default]
    Ngn,
    Usd,
    Eur,
    Gbp,
}

impl DisplayCurrency {
    pub fn code(&self) -> &'static str {
        match self {
            DisplayCurrency::Ngn => "NGN",
            DisplayCurrency::Usd => "USD",
            DisplayCurrency::Eur => "EUR",
            DisplayCurrency::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            DisplayCurrency::Ngn => "₦",
            DisplayCurrency::Usd => "$",
            DisplayCurrency::Eur => "€",
            DisplayCurrency::Gbp => "£",
        }
    }

    /// Render an amount as e.g. "₦1,350.00"
    pub fn format(&self, price: Price) -> String {
        let minor = price.minor();
        let sign = if minor < 0 { "-" } else { "" };
        let abs = minor.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            self.symbol(),
            group_thousands(abs / 100),
            abs % 100
        )
    }
}

impl FromStr for DisplayCurrency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NGN" => Ok(DisplayCurrency::Ngn),
            "USD" => Ok(DisplayCurrency::Usd),
            "EUR" => Ok(DisplayCurrency::Eur),
            "GBP" => Ok(DisplayCurrency::Gbp),
            other => Err(CoreError::ValidationError(format!(
                "unsupported display currency '{}'",
                other
            ))),
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
