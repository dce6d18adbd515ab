use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CompoundInterestError;
use crate::types::{Money, Percent, Rate};
use crate::CompoundInterestResult;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest projection the form will accept (100 years).
pub const MAX_TOTAL_MONTHS: u32 = 1200;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Cadence at which the periodic deposit is paid in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositFrequency {
    #[default]
    Monthly,
    /// Paid once at the end of every twelfth month.
    Yearly,
}

/// Unit the projection duration is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Months,
    #[default]
    Years,
}

impl std::fmt::Display for DepositFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepositFrequency::Monthly => write!(f, "monthly"),
            DepositFrequency::Yearly => write!(f, "yearly"),
        }
    }
}

impl std::fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationUnit::Months => write!(f, "months"),
            DurationUnit::Years => write!(f, "years"),
        }
    }
}

/// Validated numeric inputs for a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub initial_amount: Money,
    /// Nominal annual rate as a percentage (12 = 12%).
    pub annual_interest_rate_percent: Percent,
    pub deposit_frequency: DepositFrequency,
    pub duration_unit: DurationUnit,
    pub duration: u32,
    pub periodic_deposit: Money,
}

impl Inputs {
    /// Number of monthly periods the projection runs for.
    pub fn total_months(&self) -> CompoundInterestResult<u32> {
        match self.duration_unit {
            DurationUnit::Months => Ok(self.duration),
            DurationUnit::Years => self.duration.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
                CompoundInterestError::invalid("duration", "duration in months overflows u32")
            }),
        }
    }

    /// Reject projections longer than `MAX_TOTAL_MONTHS`. The engine runs
    /// whatever it is given, so every caller facing users goes through here.
    pub fn check_limits(&self) -> CompoundInterestResult<()> {
        let total_months = self.total_months()?;
        if total_months > MAX_TOTAL_MONTHS {
            return Err(CompoundInterestError::invalid(
                "duration",
                format!(
                    "projection of {total_months} months exceeds the {MAX_TOTAL_MONTHS}-month limit"
                ),
            ));
        }
        Ok(())
    }

    /// Annual percentage / 100 / 12.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_interest_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
    }

    /// Deposit spread evenly over months. Informational only: yearly deposits
    /// are still paid as a lump sum at each year end.
    pub fn monthly_deposit_equivalent(&self) -> Money {
        match self.deposit_frequency {
            DepositFrequency::Monthly => self.periodic_deposit,
            DepositFrequency::Yearly => self.periodic_deposit / Decimal::from(MONTHS_PER_YEAR),
        }
    }
}

/// Form state as entered by a user: numbers are kept as the typed text.
///
/// Field aliases accept the camelCase keys of saved browser form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputs {
    #[serde(default, alias = "initialAmount")]
    pub initial_amount: String,
    #[serde(default, alias = "interestRate")]
    pub interest_rate: String,
    #[serde(default, alias = "depositFrequency")]
    pub deposit_frequency: DepositFrequency,
    #[serde(default, alias = "durationType")]
    pub duration_unit: DurationUnit,
    #[serde(default)]
    pub duration: String,
    #[serde(default, alias = "periodicDeposit")]
    pub periodic_deposit: String,
}

// ---------------------------------------------------------------------------
// Boundary parsing
// ---------------------------------------------------------------------------

impl RawInputs {
    /// Read saved form state.
    pub fn from_json(json: &str) -> CompoundInterestResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Yearly deposits only make sense over whole years. Returns `true` when
    /// the duration unit had to be changed.
    pub fn enforce_coupling(&mut self) -> bool {
        if self.deposit_frequency == DepositFrequency::Yearly
            && self.duration_unit != DurationUnit::Years
        {
            self.duration_unit = DurationUnit::Years;
            return true;
        }
        false
    }

    /// Parse and validate the form into engine inputs.
    pub fn parse(&self) -> CompoundInterestResult<Inputs> {
        let mut form = self.clone();
        form.enforce_coupling();

        let initial_amount = parse_decimal("initial_amount", &form.initial_amount)?
            .unwrap_or(Decimal::ZERO);
        let annual_interest_rate_percent =
            parse_decimal("interest_rate", &form.interest_rate)?.unwrap_or(Decimal::ZERO);
        let periodic_deposit = parse_decimal("periodic_deposit", &form.periodic_deposit)?
            .ok_or_else(|| CompoundInterestError::invalid("periodic_deposit", "required"))?;
        let duration = parse_duration(&form.duration)?;

        if initial_amount < Decimal::ZERO {
            return Err(CompoundInterestError::invalid(
                "initial_amount",
                "initial_amount must be >= 0",
            ));
        }
        if periodic_deposit < Decimal::ZERO {
            return Err(CompoundInterestError::invalid(
                "periodic_deposit",
                "periodic_deposit must be >= 0",
            ));
        }

        let inputs = Inputs {
            initial_amount,
            annual_interest_rate_percent,
            deposit_frequency: form.deposit_frequency,
            duration_unit: form.duration_unit,
            duration,
            periodic_deposit,
        };

        inputs.check_limits()?;
        Ok(inputs)
    }
}

/// Blank text means "not entered" and yields `None`.
fn parse_decimal(field: &str, text: &str) -> CompoundInterestResult<Option<Decimal>> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(&cleaned)
        .map(Some)
        .map_err(|_| CompoundInterestError::invalid(field, format!("'{}' is not a number", text.trim())))
}

fn parse_duration(text: &str) -> CompoundInterestResult<u32> {
    let value = parse_decimal("duration", text)?
        .ok_or_else(|| CompoundInterestError::invalid("duration", "required"))?;
    if value <= Decimal::ZERO {
        return Err(CompoundInterestError::invalid("duration", "duration must be > 0"));
    }
    if !value.fract().is_zero() {
        return Err(CompoundInterestError::invalid(
            "duration",
            "duration must be a whole number",
        ));
    }
    value
        .to_u32()
        .ok_or_else(|| CompoundInterestError::invalid("duration", "duration is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form() -> RawInputs {
        RawInputs {
            initial_amount: "1000".into(),
            interest_rate: "12".into(),
            deposit_frequency: DepositFrequency::Monthly,
            duration_unit: DurationUnit::Months,
            duration: "12".into(),
            periodic_deposit: "0".into(),
        }
    }

    #[test]
    fn test_parse_basic_form() {
        let inputs = form().parse().unwrap();
        assert_eq!(
            inputs,
            Inputs {
                initial_amount: dec!(1000),
                annual_interest_rate_percent: dec!(12),
                deposit_frequency: DepositFrequency::Monthly,
                duration_unit: DurationUnit::Months,
                duration: 12,
                periodic_deposit: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn test_blank_principal_and_rate_default_to_zero() {
        let mut raw = form();
        raw.initial_amount = String::new();
        raw.interest_rate = "  ".into();
        let inputs = raw.parse().unwrap();
        assert_eq!(inputs.initial_amount, Decimal::ZERO);
        assert_eq!(inputs.annual_interest_rate_percent, Decimal::ZERO);
    }

    #[test]
    fn test_blank_deposit_and_duration_are_required() {
        let mut raw = form();
        raw.periodic_deposit = String::new();
        assert!(matches!(
            raw.parse(),
            Err(CompoundInterestError::InvalidInput { ref field, .. }) if field == "periodic_deposit"
        ));

        let mut raw = form();
        raw.duration = String::new();
        assert!(matches!(
            raw.parse(),
            Err(CompoundInterestError::InvalidInput { ref field, .. }) if field == "duration"
        ));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let mut raw = form();
        raw.interest_rate = "twelve".into();
        let err = raw.parse().unwrap_err();
        assert!(err.to_string().contains("interest_rate"));
    }

    #[test]
    fn test_thousands_separators_stripped() {
        let mut raw = form();
        raw.initial_amount = "1,250,000".into();
        assert_eq!(raw.parse().unwrap().initial_amount, dec!(1250000));
    }

    #[test]
    fn test_duration_must_be_positive_whole_number() {
        for bad in ["0", "-3", "1.5"] {
            let mut raw = form();
            raw.duration = bad.into();
            assert!(raw.parse().is_err(), "duration '{bad}' should be rejected");
        }
        let mut raw = form();
        raw.duration = "24.0".into();
        assert_eq!(raw.parse().unwrap().duration, 24);
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let mut raw = form();
        raw.initial_amount = "-1".into();
        assert!(raw.parse().is_err());

        let mut raw = form();
        raw.periodic_deposit = "-100".into();
        assert!(raw.parse().is_err());
    }

    #[test]
    fn test_negative_rate_is_valid() {
        let mut raw = form();
        raw.interest_rate = "-2.5".into();
        assert_eq!(raw.parse().unwrap().annual_interest_rate_percent, dec!(-2.5));
    }

    #[test]
    fn test_yearly_forces_years() {
        let mut raw = form();
        raw.deposit_frequency = DepositFrequency::Yearly;
        raw.duration = "2".into();
        assert!(raw.clone().enforce_coupling());
        let inputs = raw.parse().unwrap();
        assert_eq!(inputs.duration_unit, DurationUnit::Years);
        assert_eq!(inputs.total_months().unwrap(), 24);
    }

    #[test]
    fn test_coupling_noop_for_monthly() {
        let mut raw = form();
        assert!(!raw.enforce_coupling());
        assert_eq!(raw.duration_unit, DurationUnit::Months);
    }

    #[test]
    fn test_duration_cap() {
        let mut raw = form();
        raw.duration_unit = DurationUnit::Years;
        raw.duration = "100".into();
        assert!(raw.parse().is_ok());
        raw.duration = "101".into();
        assert!(raw.parse().is_err());
    }

    #[test]
    fn test_check_limits_on_numeric_inputs() {
        let mut inputs = form().parse().unwrap();
        inputs.duration = MAX_TOTAL_MONTHS;
        assert!(inputs.check_limits().is_ok());

        inputs.duration = u32::MAX;
        assert!(matches!(
            inputs.check_limits(),
            Err(CompoundInterestError::InvalidInput { ref field, .. }) if field == "duration"
        ));

        inputs.duration_unit = DurationUnit::Years;
        inputs.duration = 101;
        assert!(inputs.check_limits().is_err());
    }

    #[test]
    fn test_monthly_rate_and_deposit_equivalent() {
        let mut inputs = form().parse().unwrap();
        assert_eq!(inputs.monthly_rate(), dec!(0.01));

        inputs.deposit_frequency = DepositFrequency::Yearly;
        inputs.periodic_deposit = dec!(1200);
        assert_eq!(inputs.monthly_deposit_equivalent(), dec!(100));
    }

    #[test]
    fn test_from_json_rejects_malformed_state() {
        let err = RawInputs::from_json("{\"duration\": ").unwrap_err();
        assert!(matches!(err, CompoundInterestError::SerializationError(_)));
    }

    #[test]
    fn test_deserialize_saved_browser_state() {
        let json = r#"{
            "initialAmount": "5000",
            "interestRate": "7",
            "depositFrequency": "yearly",
            "durationType": "years",
            "duration": "10",
            "periodicDeposit": "1200"
        }"#;
        let raw = RawInputs::from_json(json).unwrap();
        assert_eq!(raw.deposit_frequency, DepositFrequency::Yearly);
        assert_eq!(raw.initial_amount, "5000");
        assert_eq!(raw.parse().unwrap().total_months().unwrap(), 120);
    }
}
