use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CompoundInterestError;
use crate::inputs::{DepositFrequency, Inputs, MAX_TOTAL_MONTHS, MONTHS_PER_YEAR};
use crate::types::{Money, Rate};
use crate::CompoundInterestResult;

/// Flat tax on realised profit at withdrawal.
pub const TAX_RATE: Rate = dec!(0.25);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Balances at the end of one month of the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// 1-based month index.
    pub period: u32,
    /// Initial amount plus every deposit made through this month.
    pub cumulative_deposits: Money,
    pub profit: Money,
    pub total: Money,
}

/// Output of `project`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub final_amount: Money,
    pub total_deposits: Money,
    pub total_profit: Money,
    pub profit_after_tax: Money,
    pub monthly_details: Vec<PeriodRecord>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project a balance month by month.
///
/// Interest always compounds monthly, whatever the deposit cadence. Each
/// month accrues interest on the opening balance, then adds that month's
/// deposit. Yearly deposits land in full at months 12, 24, ...
pub fn project(inputs: &Inputs) -> CompoundInterestResult<ProjectionResult> {
    validate(inputs)?;

    let total_months = inputs.total_months()?;
    let monthly_rate = inputs.monthly_rate();

    let mut current_amount = inputs.initial_amount;
    let mut total_deposits = inputs.initial_amount;
    let mut monthly_details = Vec::with_capacity(total_months.min(MAX_TOTAL_MONTHS) as usize);

    for month in 1..=total_months {
        let deposit = deposit_for_month(inputs, month);
        current_amount = current_amount
            .checked_mul(monthly_rate)
            .and_then(|interest| current_amount.checked_add(interest))
            .and_then(|amount| amount.checked_add(deposit))
            .ok_or_else(|| CompoundInterestError::out_of_range("annual_interest_rate_percent"))?;
        total_deposits = total_deposits
            .checked_add(deposit)
            .ok_or_else(|| CompoundInterestError::out_of_range("periodic_deposit"))?;

        monthly_details.push(PeriodRecord {
            period: month,
            cumulative_deposits: total_deposits,
            profit: profit(current_amount, total_deposits)?,
            total: current_amount,
        });
    }

    let total_profit = profit(current_amount, total_deposits)?;

    Ok(ProjectionResult {
        final_amount: current_amount,
        total_deposits,
        total_profit,
        profit_after_tax: total_profit * (Decimal::ONE - TAX_RATE),
        monthly_details,
    })
}

fn profit(total: Money, deposits: Money) -> CompoundInterestResult<Money> {
    total
        .checked_sub(deposits)
        .ok_or_else(|| CompoundInterestError::out_of_range("annual_interest_rate_percent"))
}

fn validate(inputs: &Inputs) -> CompoundInterestResult<()> {
    if inputs.duration == 0 {
        return Err(CompoundInterestError::InvalidInput {
            field: "duration".into(),
            reason: "duration must be > 0".into(),
        });
    }
    if inputs.initial_amount < Decimal::ZERO {
        return Err(CompoundInterestError::InvalidInput {
            field: "initial_amount".into(),
            reason: "initial_amount must be >= 0".into(),
        });
    }
    if inputs.periodic_deposit < Decimal::ZERO {
        return Err(CompoundInterestError::InvalidInput {
            field: "periodic_deposit".into(),
            reason: "periodic_deposit must be >= 0".into(),
        });
    }
    Ok(())
}

fn deposit_for_month(inputs: &Inputs, month: u32) -> Money {
    match inputs.deposit_frequency {
        DepositFrequency::Monthly => inputs.periodic_deposit,
        DepositFrequency::Yearly if month % MONTHS_PER_YEAR == 0 => inputs.periodic_deposit,
        DepositFrequency::Yearly => Decimal::ZERO,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
