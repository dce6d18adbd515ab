use clap::{Args, ValueEnum};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use compound_interest_core::inputs::{DepositFrequency, DurationUnit, RawInputs};
use compound_interest_core::report::{self, ReportView};
use compound_interest_core::types::with_metadata;
use compound_interest_core::Currency;

use crate::input;
use crate::state::StateStore;
use crate::OutputFormat;

const METHODOLOGY: &str = "Monthly compounding on the opening balance, deposits credited at \
                           month end (yearly deposits at every 12th month), flat tax on profit";

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FrequencyArg {
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitArg {
    Months,
    Years,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ViewArg {
    /// Per-period rows (yearly rows only for yearly deposits)
    Schedule,
    /// Every month with chart axis ticks
    Series,
}

impl From<FrequencyArg> for DepositFrequency {
    fn from(f: FrequencyArg) -> Self {
        match f {
            FrequencyArg::Monthly => DepositFrequency::Monthly,
            FrequencyArg::Yearly => DepositFrequency::Yearly,
        }
    }
}

impl From<UnitArg> for DurationUnit {
    fn from(u: UnitArg) -> Self {
        match u {
            UnitArg::Months => DurationUnit::Months,
            UnitArg::Years => DurationUnit::Years,
        }
    }
}

impl From<ViewArg> for ReportView {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::Schedule => ReportView::Schedule,
            ViewArg::Series => ReportView::Series,
        }
    }
}

/// Arguments for a compound interest projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Starting principal (blank means 0)
    #[arg(long, alias = "principal")]
    pub initial_amount: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 7 for 7%, may be negative)
    #[arg(long, alias = "rate", allow_hyphen_values = true)]
    pub interest_rate: Option<Decimal>,

    /// Amount deposited each period
    #[arg(long)]
    pub deposit: Option<Decimal>,

    /// Deposit frequency
    #[arg(long, value_enum)]
    pub frequency: Option<FrequencyArg>,

    /// Projection length, in --unit units
    #[arg(long)]
    pub duration: Option<u32>,

    /// Unit of --duration (forced to years for yearly deposits)
    #[arg(long, value_enum)]
    pub unit: Option<UnitArg>,

    /// Currency used for table output (ILS, USD, EUR, ...)
    #[arg(long, default_value = "ILS")]
    pub currency: Currency,

    /// Per-period listing to include
    #[arg(long, value_enum, default_value = "schedule")]
    pub view: ViewArg,

    /// Path to JSON or YAML form file (overrides saved inputs and flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Do not remember these inputs for the next run
    #[arg(long)]
    pub no_save: bool,
}

pub fn run_project(
    args: ProjectArgs,
    format: &OutputFormat,
    store: &StateStore,
) -> Result<Value, Box<dyn std::error::Error>> {
    let saved = store.load();

    let mut raw: RawInputs = if let Some(ref path) = args.input {
        debug!("reading form from {}", path);
        warn_ignored_flags(&args, path);
        input::file::read_input(path)?
    } else if let Some(form) = input::stdin::read_stdin()? {
        debug!("reading form from stdin");
        warn_ignored_flags(&args, "stdin");
        form
    } else {
        let mut form = saved.clone().unwrap_or_default();
        overlay_flags(&mut form, &args);
        form
    };

    let mut warnings: Vec<String> = Vec::new();
    if raw.enforce_coupling() {
        warnings.push(
            "Duration unit changed to years: yearly deposits need a duration in whole years"
                .into(),
        );
    }

    let inputs = raw.parse()?;
    if inputs.annual_interest_rate_percent < Decimal::ZERO {
        warnings.push("Negative interest rate: the balance shrinks between deposits".into());
    }

    let start = Instant::now();
    let report = report::build_report(&inputs, args.view.into())?;
    let elapsed = start.elapsed().as_micros() as u64;

    if !args.no_save && saved.as_ref() != Some(&raw) {
        store.save(&raw)?;
    }

    let total_months = inputs.total_months()?;
    info!(
        "projected {} months, final amount {}",
        total_months, report.summary.final_amount
    );

    let assumptions = serde_json::json!({
        "total_months": total_months,
        "monthly_rate": inputs.monthly_rate().to_string(),
        "tax_rate": report.summary.tax_rate.to_string(),
        "deposit_frequency": inputs.deposit_frequency.to_string(),
        "duration_unit": inputs.duration_unit.to_string(),
    });

    let output = match format {
        OutputFormat::Table => serde_json::to_value(with_metadata(
            METHODOLOGY,
            &assumptions,
            warnings,
            elapsed,
            report.formatted(&args.currency),
        ))?,
        _ => serde_json::to_value(with_metadata(
            METHODOLOGY,
            &assumptions,
            warnings,
            elapsed,
            report,
        ))?,
    };
    Ok(output)
}

/// Value flags only overlay saved state; a complete form from a file or
/// stdin takes precedence over them.
fn warn_ignored_flags(args: &ProjectArgs, source: &str) {
    if has_value_flags(args) {
        warn!("form read from {source}; value flags on the command line are ignored");
    }
}

fn has_value_flags(args: &ProjectArgs) -> bool {
    args.initial_amount.is_some()
        || args.interest_rate.is_some()
        || args.deposit.is_some()
        || args.duration.is_some()
        || args.frequency.is_some()
        || args.unit.is_some()
}

/// Flags given on the command line replace the matching saved values.
fn overlay_flags(form: &mut RawInputs, args: &ProjectArgs) {
    if let Some(v) = args.initial_amount {
        form.initial_amount = v.to_string();
    }
    if let Some(v) = args.interest_rate {
        form.interest_rate = v.to_string();
    }
    if let Some(v) = args.deposit {
        form.periodic_deposit = v.to_string();
    }
    if let Some(v) = args.duration {
        form.duration = v.to_string();
    }
    if let Some(v) = args.frequency {
        form.deposit_frequency = v.into();
    }
    if let Some(v) = args.unit {
        form.duration_unit = v.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn args() -> ProjectArgs {
        ProjectArgs {
            initial_amount: None,
            interest_rate: None,
            deposit: None,
            frequency: None,
            duration: None,
            unit: None,
            currency: Currency::ILS,
            view: ViewArg::Schedule,
            input: None,
            no_save: true,
        }
    }

    #[test]
    fn test_flags_override_saved_values() {
        let mut form = RawInputs {
            initial_amount: "1000".into(),
            interest_rate: "5".into(),
            deposit_frequency: DepositFrequency::Monthly,
            duration_unit: DurationUnit::Months,
            duration: "12".into(),
            periodic_deposit: "100".into(),
        };
        let mut a = args();
        a.interest_rate = Some(dec!(-1.5));
        a.frequency = Some(FrequencyArg::Yearly);
        a.duration = Some(3);

        overlay_flags(&mut form, &a);

        assert_eq!(form.initial_amount, "1000");
        assert_eq!(form.interest_rate, "-1.5");
        assert_eq!(form.duration, "3");
        assert_eq!(form.deposit_frequency, DepositFrequency::Yearly);
        // Unit is left for the coupling rule to fix.
        assert_eq!(form.duration_unit, DurationUnit::Months);
    }

    #[test]
    fn test_value_flags_detected() {
        assert!(!has_value_flags(&args()));

        let mut a = args();
        a.unit = Some(UnitArg::Months);
        assert!(has_value_flags(&a));

        // Output-shaping flags do not count as form values.
        let mut a = args();
        a.view = ViewArg::Series;
        a.currency = Currency::USD;
        a.no_save = false;
        assert!(!has_value_flags(&a));
    }

    #[test]
    fn test_no_flags_keeps_saved_form() {
        let saved = RawInputs {
            duration: "10".into(),
            periodic_deposit: "50".into(),
            ..RawInputs::default()
        };
        let mut form = saved.clone();
        overlay_flags(&mut form, &args());
        assert_eq!(form, saved);
    }
}
