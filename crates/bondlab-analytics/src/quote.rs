//! Market inputs for one analysis.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Either a clean price or a yield, never both.
///
/// Prices are in percent of the notional outstanding at settlement. For an
/// amortizing bond that is less than the original face value; the engine
/// derives it from the schedule unless the quote overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarketQuote {
    /// Clean price quote.
    Price {
        /// Clean price in percent of outstanding notional.
        clean_pct: Decimal,
        /// Outstanding notional override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outstanding_notional: Option<Decimal>,
    },
    /// Yield quote.
    Yield {
        /// Yield as a decimal rate at the bond's compounding frequency.
        rate: Decimal,
        /// Outstanding notional override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outstanding_notional: Option<Decimal>,
    },
}

impl MarketQuote {
    /// A clean price in percent of outstanding notional.
    #[must_use]
    pub fn price(clean_pct: Decimal) -> Self {
        MarketQuote::Price {
            clean_pct,
            outstanding_notional: None,
        }
    }

    /// A yield as a decimal rate (`0.051` for 5.1%).
    #[must_use]
    pub fn yield_rate(rate: Decimal) -> Self {
        MarketQuote::Yield {
            rate,
            outstanding_notional: None,
        }
    }

    /// Builds a quote from optional inputs of which exactly one is set.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when both or neither are supplied.
    pub fn from_options(
        clean_pct: Option<Decimal>,
        yield_rate: Option<Decimal>,
    ) -> AnalyticsResult<Self> {
        match (clean_pct, yield_rate) {
            (Some(price), None) => Ok(Self::price(price)),
            (None, Some(rate)) => Ok(Self::yield_rate(rate)),
            (Some(_), Some(_)) => Err(AnalyticsError::invalid_input(
                "supply either a price or a yield, not both",
            )),
            (None, None) => Err(AnalyticsError::invalid_input(
                "a price or a yield is required",
            )),
        }
    }

    /// Overrides the outstanding notional the price refers to.
    #[must_use]
    pub fn with_outstanding_notional(self, notional: Decimal) -> Self {
        match self {
            MarketQuote::Price { clean_pct, .. } => MarketQuote::Price {
                clean_pct,
                outstanding_notional: Some(notional),
            },
            MarketQuote::Yield { rate, .. } => MarketQuote::Yield {
                rate,
                outstanding_notional: Some(notional),
            },
        }
    }

    /// The outstanding notional override, if any.
    #[must_use]
    pub fn outstanding_notional(&self) -> Option<Decimal> {
        match self {
            MarketQuote::Price {
                outstanding_notional,
                ..
            }
            | MarketQuote::Yield {
                outstanding_notional,
                ..
            } => *outstanding_notional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exactly_one_input() {
        assert_eq!(
            MarketQuote::from_options(Some(dec!(99.5)), None).unwrap(),
            MarketQuote::price(dec!(99.5))
        );
        assert_eq!(
            MarketQuote::from_options(None, Some(dec!(0.051))).unwrap(),
            MarketQuote::yield_rate(dec!(0.051))
        );
        assert!(MarketQuote::from_options(Some(dec!(99.5)), Some(dec!(0.05))).is_err());
        assert!(MarketQuote::from_options(None, None).is_err());
    }

    #[test]
    fn test_notional_override() {
        let quote = MarketQuote::price(dec!(69.78)).with_outstanding_notional(dec!(40));
        assert_eq!(quote.outstanding_notional(), Some(dec!(40)));
        assert_eq!(MarketQuote::yield_rate(dec!(0.05)).outstanding_notional(), None);
    }

    #[test]
    fn test_json_shape() {
        let quote: MarketQuote =
            serde_json::from_str(r#"{"type":"price","clean_pct":101.25}"#).unwrap();
        assert_eq!(quote, MarketQuote::price(dec!(101.25)));
    }
}
