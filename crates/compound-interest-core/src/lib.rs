pub mod error;
pub mod inputs;
pub mod time_value;
pub mod types;

#[cfg(feature = "projection")]
pub mod projection;

#[cfg(feature = "report")]
pub mod report;

pub use error::CompoundInterestError;
pub use inputs::{DepositFrequency, DurationUnit, Inputs, RawInputs};
pub use types::*;

#[cfg(feature = "projection")]
pub use projection::{project, PeriodRecord, ProjectionResult};

/// Standard result type for all compound-interest operations
pub type CompoundInterestResult<T> = Result<T, CompoundInterestError>;
