use napi::Result as NapiResult;
use napi_derive::napi;

use compound_interest_core::inputs::{Inputs, RawInputs};
use compound_interest_core::report::{self, ReportView};
use compound_interest_core::Currency;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Run the engine on numeric inputs, capped at the form's duration limit.
#[napi]
pub fn project(input_json: String) -> NapiResult<String> {
    let input: Inputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    input.check_limits().map_err(to_napi_error)?;
    let output = compound_interest_core::project(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Parse saved form state and build the summary plus schedule (or chart
/// series when `view` is "series").
#[napi]
pub fn project_form(form_json: String, view: Option<String>) -> NapiResult<String> {
    let form = RawInputs::from_json(&form_json).map_err(to_napi_error)?;
    let inputs = form.parse().map_err(to_napi_error)?;
    let view = match view.as_deref() {
        None | Some("schedule") => ReportView::Schedule,
        Some("series") => ReportView::Series,
        Some(other) => {
            return Err(to_napi_error(format!(
                "unknown view '{other}', expected 'schedule' or 'series'"
            )))
        }
    };
    let output = report::build_report(&inputs, view).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// `amount` is a decimal string so no precision is lost crossing into JS.
#[napi]
pub fn format_currency(amount: String, currency: Option<String>) -> NapiResult<String> {
    let amount: rust_decimal::Decimal = amount.trim().parse().map_err(to_napi_error)?;
    let currency: Currency = match currency {
        Some(code) => code.parse().map_err(to_napi_error)?,
        None => Currency::default(),
    };
    Ok(report::format_currency(amount, &currency))
}

#[napi]
pub fn period_label(month: u32) -> String {
    report::period_label(month)
}
