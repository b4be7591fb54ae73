pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "sip")]
pub mod sip;

#[cfg(feature = "emi")]
pub mod emi;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "retirement")]
pub mod retirement;

pub use error::FinCalcError;
pub use types::*;

/// Standard result type for all fincalc operations
pub type FinCalcResult<T> = Result<T, FinCalcError>;
