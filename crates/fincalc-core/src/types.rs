use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rupee amounts. Always Decimal, never f64.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Inputs arrive as percentages
/// and are converted with [`crate::time_value::monthly_rate`] or
/// [`crate::time_value::annual_rate`].
pub type Rate = Decimal;

/// Envelope returned by every calculator: the result plus the inputs echoed
/// back as `assumptions` and any non-fatal `warnings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
