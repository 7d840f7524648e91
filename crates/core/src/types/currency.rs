//! Base currency for invoices and money display.

use serde::{Deserialize, Serialize};

/// Currency the business invoices in.
///
/// Stored on the remote business settings as a three-letter code.
/// `USD` is the API default for new installations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Clp,
    Eur,
}

impl Currency {
    /// All supported currencies. Drives the settings dropdown.
    #[must_use]
    pub const fn variants() -> [Self; 3] {
        [Self::Usd, Self::Clp, Self::Eur]
    }

    /// Three-letter wire code, e.g. `"USD"`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Clp => "CLP",
            Self::Eur => "EUR",
        }
    }

    /// Symbol used on invoices.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Usd | Self::Clp => "$",
            Self::Eur => "€",
        }
    }

    /// Dropdown label, e.g. `"USD ($)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.code(), self.symbol())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Self::Usd),
            "CLP" => Ok(Self::Clp),
            "EUR" => Ok(Self::Eur),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_code_round_trips() {
        for currency in Currency::variants() {
            let parsed: Currency = currency.code().parse().unwrap();
            assert_eq!(parsed, currency);
        }
    }

    #[test]
    fn test_serde_uses_uppercase_codes() {
        assert_eq!(serde_json::to_string(&Currency::Eur).unwrap(), "\"EUR\"");
        let parsed: Currency = serde_json::from_str("\"CLP\"").unwrap();
        assert_eq!(parsed, Currency::Clp);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Currency::Usd.label(), "USD ($)");
        assert_eq!(Currency::Eur.label(), "EUR (€)");
    }

    #[test]
    fn test_default_is_usd() {
        assert_eq!(Currency::default(), Currency::Usd);
    }
}
