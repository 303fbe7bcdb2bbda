//! Option Contract Value Object
//!
//! The canonical, already-normalized contract record the aggregator
//! consumes. Upstream adapters map their own response shapes into either
//! [`OptionContract`] directly or the loosely typed [`ContractRecord`].

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ContractError;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl OptionType {
    /// Sign applied to a contract's gamma exposure: puts contribute negatively.
    #[must_use]
    pub const fn exposure_sign(self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(Self::Call),
            "put" | "p" => Ok(Self::Put),
            _ => Err(ContractError::UnknownOptionType {
                value: s.to_string(),
            }),
        }
    }
}

/// One traded contract-expiration instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    /// Strike price.
    pub strike: Decimal,
    /// Call or put.
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// Gamma greek.
    pub gamma: f64,
    /// Outstanding contracts.
    pub open_interest: f64,
    /// Expiration date, used by the projected profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<NaiveDate>,
    /// Annualized implied volatility, used by the projected profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implied_volatility: Option<f64>,
}

impl OptionContract {
    /// Create a new contract without projection inputs.
    #[must_use]
    pub const fn new(
        strike: Decimal,
        option_type: OptionType,
        gamma: f64,
        open_interest: f64,
    ) -> Self {
        Self {
            strike,
            option_type,
            gamma,
            open_interest,
            expiration: None,
            implied_volatility: None,
        }
    }

    /// Create a call contract.
    #[must_use]
    pub const fn call(strike: Decimal, gamma: f64, open_interest: f64) -> Self {
        Self::new(strike, OptionType::Call, gamma, open_interest)
    }

    /// Create a put contract.
    #[must_use]
    pub const fn put(strike: Decimal, gamma: f64, open_interest: f64) -> Self {
        Self::new(strike, OptionType::Put, gamma, open_interest)
    }

    /// Attach expiration and implied volatility.
    #[must_use]
    pub const fn with_expiry(mut self, expiration: NaiveDate, implied_volatility: f64) -> Self {
        self.expiration = Some(expiration);
        self.implied_volatility = Some(implied_volatility);
        self
    }

    /// Check the numeric invariants of the record.
    pub fn validate(&self) -> Result<(), ContractError> {
        if !self.gamma.is_finite() {
            return Err(ContractError::NonFiniteGamma {
                strike: self.strike,
                gamma: self.gamma,
            });
        }
        if !self.open_interest.is_finite() || self.open_interest < 0.0 {
            return Err(ContractError::InvalidOpenInterest {
                strike: self.strike,
                open_interest: self.open_interest,
            });
        }
        Ok(())
    }

    /// Signed exposure for the given gamma: `gamma * open_interest`, negated for puts.
    #[must_use]
    pub fn exposure_for(&self, gamma: f64) -> f64 {
        gamma * self.open_interest * self.option_type.exposure_sign()
    }

    /// Signed exposure from the contract's own gamma.
    #[must_use]
    pub fn gamma_exposure(&self) -> f64 {
        self.exposure_for(self.gamma)
    }
}

/// Contract as handed over by an upstream adapter, with the option type
/// still a free-form string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    /// Strike price. Accepts JSON numbers and numeric strings.
    pub strike: Decimal,
    /// Raw option type, e.g. `"call"`.
    #[serde(rename = "type", alias = "optionType")]
    pub option_type: String,
    /// Gamma greek.
    pub gamma: f64,
    /// Outstanding contracts.
    pub open_interest: f64,
    /// Expiration date.
    #[serde(default)]
    pub expiration: Option<NaiveDate>,
    /// Annualized implied volatility.
    #[serde(default)]
    pub implied_volatility: Option<f64>,
}

impl TryFrom<&ContractRecord> for OptionContract {
    type Error = ContractError;

    fn try_from(record: &ContractRecord) -> Result<Self, Self::Error> {
        let contract = Self {
            strike: record.strike,
            option_type: record.option_type.parse()?,
            gamma: record.gamma,
            open_interest: record.open_interest,
            expiration: record.expiration,
            implied_volatility: record.implied_volatility,
        };
        contract.validate()?;
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case("call", OptionType::Call ; "lowercase call")]
    #[test_case("PUT", OptionType::Put ; "uppercase put")]
    #[test_case(" Call ", OptionType::Call ; "padded call")]
    #[test_case("p", OptionType::Put ; "short put")]
    fn option_type_parses(input: &str, expected: OptionType) {
        assert_eq!(input.parse::<OptionType>().unwrap(), expected);
    }

    #[test]
    fn option_type_rejects_unknown() {
        let err = "straddle".parse::<OptionType>().unwrap_err();
        assert!(matches!(err, ContractError::UnknownOptionType { .. }));
    }

    #[test]
    fn option_type_serde() {
        let json = serde_json::to_string(&OptionType::Put).unwrap();
        assert_eq!(json, "\"put\"");
        assert_eq!(OptionType::Call.to_string(), "call");
    }

    #[test]
    fn exposure_sign_follows_type() {
        let call = OptionContract::call(dec!(100), 0.02, 100.0);
        let put = OptionContract::put(dec!(100), 0.02, 100.0);
        assert!((call.gamma_exposure() - 2.0).abs() < 1e-12);
        assert!((put.gamma_exposure() + 2.0).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_bad_numbers() {
        let nan_gamma = OptionContract::call(dec!(100), f64::NAN, 10.0);
        assert!(matches!(
            nan_gamma.validate(),
            Err(ContractError::NonFiniteGamma { .. })
        ));

        let negative_oi = OptionContract::put(dec!(100), 0.01, -1.0);
        assert!(matches!(
            negative_oi.validate(),
            Err(ContractError::InvalidOpenInterest { .. })
        ));

        let inf_oi = OptionContract::put(dec!(100), 0.01, f64::INFINITY);
        assert!(inf_oi.validate().is_err());

        assert!(OptionContract::call(dec!(100), 0.01, 0.0).validate().is_ok());
    }

    #[test]
    fn record_from_json_with_string_strike() {
        let json = r#"{"strike":"502.5","type":"Put","gamma":0.013,"openInterest":42}"#;
        let record: ContractRecord = serde_json::from_str(json).unwrap();
        let contract = OptionContract::try_from(&record).unwrap();

        assert_eq!(contract.strike, dec!(502.5));
        assert_eq!(contract.option_type, OptionType::Put);
        assert!(contract.expiration.is_none());
    }

    #[test]
    fn record_with_unknown_type_is_rejected() {
        let record = ContractRecord {
            strike: dec!(10),
            option_type: "future".to_string(),
            gamma: 0.1,
            open_interest: 1.0,
            expiration: None,
            implied_volatility: None,
        };
        assert!(OptionContract::try_from(&record).is_err());
    }

    #[test]
    fn contract_serde_uses_camel_case() {
        let contract = OptionContract::call(dec!(450), 0.01, 200.0)
            .with_expiry(NaiveDate::from_ymd_opt(2025, 1, 17).unwrap(), 0.2);
        let value = serde_json::to_value(&contract).unwrap();

        assert_eq!(value["type"], "call");
        assert_eq!(value["openInterest"], 200.0);
        assert_eq!(value["expiration"], "2025-01-17");
        assert_eq!(value["impliedVolatility"], 0.2);

        let parsed: OptionContract = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, contract);
    }
}
