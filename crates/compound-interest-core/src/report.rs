use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::CompoundInterestError;
use crate::inputs::{DepositFrequency, DurationUnit, Inputs, MONTHS_PER_YEAR};
use crate::projection::{self, ProjectionResult, TAX_RATE};
use crate::time_value;
use crate::types::{Currency, Money, Rate};
use crate::CompoundInterestResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Headline figures shown above the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub final_amount: Money,
    pub total_deposits: Money,
    pub total_profit: Money,
    pub profit_after_tax: Money,
    /// What is left after paying tax on the profit: deposits + after-tax profit.
    pub final_amount_after_tax: Money,
    pub tax_rate: Rate,
    pub effective_annual_rate: Rate,
    pub monthly_deposit_equivalent: Money,
}

/// One row of the displayed schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Month number for monthly deposits, year number for yearly deposits.
    pub period: u32,
    pub label: String,
    pub cumulative_deposits: Money,
    pub profit: Money,
    pub total: Money,
}

/// One point of the balance chart. Always monthly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub period: u32,
    pub axis_tick: u32,
    pub total: Money,
    pub cumulative_deposits: Money,
    pub profit: Money,
}

/// Which per-period listing a report carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportView {
    #[default]
    Schedule,
    Series,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub inputs: Inputs,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduleRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<SeriesPoint>>,
}

/// A summary figure rendered for people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedFigure {
    pub label: String,
    pub value: String,
}

/// A schedule row rendered for people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedRow {
    pub period: u32,
    pub label: String,
    pub deposits: String,
    pub profit: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedReport {
    pub currency: Currency,
    pub figures: Vec<FormattedFigure>,
    pub schedule: Vec<FormattedRow>,
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// Run the projection and shape it for display.
pub fn build_report(inputs: &Inputs, view: ReportView) -> CompoundInterestResult<Report> {
    let result = projection::project(inputs)?;
    let summary = summarize(inputs, &result)?;

    let (schedule, series) = match view {
        ReportView::Schedule => (Some(schedule_view(&result, inputs.deposit_frequency)), None),
        ReportView::Series => (None, Some(chart_series(&result, inputs.duration_unit))),
    };

    Ok(Report {
        inputs: inputs.clone(),
        summary,
        schedule,
        series,
    })
}

pub fn summarize(inputs: &Inputs, result: &ProjectionResult) -> CompoundInterestResult<Summary> {
    Ok(Summary {
        final_amount: result.final_amount,
        total_deposits: result.total_deposits,
        total_profit: result.total_profit,
        profit_after_tax: result.profit_after_tax,
        final_amount_after_tax: result
            .total_deposits
            .checked_add(result.profit_after_tax)
            .ok_or_else(|| CompoundInterestError::out_of_range("periodic_deposit"))?,
        tax_rate: TAX_RATE,
        effective_annual_rate: time_value::effective_annual_rate(
            inputs.monthly_rate(),
            MONTHS_PER_YEAR,
        )?,
        monthly_deposit_equivalent: inputs.monthly_deposit_equivalent(),
    })
}

/// Every month for monthly deposits; only year ends for yearly deposits.
pub fn schedule_view(result: &ProjectionResult, frequency: DepositFrequency) -> Vec<ScheduleRow> {
    result
        .monthly_details
        .iter()
        .filter(|r| frequency == DepositFrequency::Monthly || r.period % MONTHS_PER_YEAR == 0)
        .map(|r| ScheduleRow {
            period: match frequency {
                DepositFrequency::Monthly => r.period,
                DepositFrequency::Yearly => r.period / MONTHS_PER_YEAR,
            },
            label: period_label(r.period),
            cumulative_deposits: r.cumulative_deposits,
            profit: r.profit,
            total: r.total,
        })
        .collect()
}

/// Monthly points; the axis tick collapses to whole years for year durations.
pub fn chart_series(result: &ProjectionResult, unit: DurationUnit) -> Vec<SeriesPoint> {
    result
        .monthly_details
        .iter()
        .map(|r| SeriesPoint {
            period: r.period,
            axis_tick: match unit {
                DurationUnit::Months => r.period,
                DurationUnit::Years => r.period / MONTHS_PER_YEAR,
            },
            total: r.total,
            cumulative_deposits: r.cumulative_deposits,
            profit: r.profit,
        })
        .collect()
}

impl Report {
    /// Render the summary and schedule as currency strings.
    pub fn formatted(&self, currency: &Currency) -> FormattedReport {
        let s = &self.summary;
        let tax_pct = (s.tax_rate * Decimal::ONE_HUNDRED).normalize();
        let figures = [
            ("Final amount".to_string(), s.final_amount),
            ("Total deposits".to_string(), s.total_deposits),
            ("Profit".to_string(), s.total_profit),
            (format!("Profit after tax ({tax_pct}%)"), s.profit_after_tax),
            ("Final amount after tax".to_string(), s.final_amount_after_tax),
        ]
        .into_iter()
        .map(|(label, amount)| FormattedFigure {
            label,
            value: format_currency(amount, currency),
        })
        .collect();

        let rows: Vec<FormattedRow> = match (&self.schedule, &self.series) {
            (Some(rows), _) => rows
                .iter()
                .map(|r| FormattedRow {
                    period: r.period,
                    label: r.label.clone(),
                    deposits: format_currency(r.cumulative_deposits, currency),
                    profit: format_currency(r.profit, currency),
                    total: format_currency(r.total, currency),
                })
                .collect(),
            (None, Some(points)) => points
                .iter()
                .map(|p| FormattedRow {
                    period: p.axis_tick,
                    label: period_label(p.period),
                    deposits: format_currency(p.cumulative_deposits, currency),
                    profit: format_currency(p.profit, currency),
                    total: format_currency(p.total, currency),
                })
                .collect(),
            (None, None) => Vec::new(),
        };

        FormattedReport {
            currency: currency.clone(),
            figures,
            schedule: rows,
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// "7 months", "2 years", "1 year and 3 months".
pub fn period_label(month: u32) -> String {
    let years = month / MONTHS_PER_YEAR;
    let months = month % MONTHS_PER_YEAR;

    let plural = |n: u32, unit: &str| {
        if n == 1 {
            format!("1 {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };

    match (years, months) {
        (0, m) => plural(m, "month"),
        (y, 0) => plural(y, "year"),
        (y, m) => format!("{} and {}", plural(y, "year"), plural(m, "month")),
    }
}

/// Whole-unit currency string, e.g. `₪1,126,826` or `-$42`.
pub fn format_currency(amount: Money, currency: &Currency) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{}{grouped}", currency.symbol())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
