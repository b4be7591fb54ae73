use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

use fincalc_core::FinCalcResult;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Deserialize `input_json`, run `calc`, serialize its output.
fn call_json<I, O>(input_json: &str, calc: impl FnOnce(&I) -> FinCalcResult<O>) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = calc(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investments and loans
// ---------------------------------------------------------------------------

#[napi]
pub fn project_sip(input_json: String) -> NapiResult<String> {
    call_json(&input_json, fincalc_core::sip::project_sip)
}

#[napi]
pub fn amortize_loan(input_json: String) -> NapiResult<String> {
    call_json(&input_json, fincalc_core::emi::amortize_loan)
}

// ---------------------------------------------------------------------------
// Income tax
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_tax_regimes(input_json: String) -> NapiResult<String> {
    call_json(&input_json, fincalc_core::tax::compare_regimes)
}

// ---------------------------------------------------------------------------
// Retirement
// ---------------------------------------------------------------------------

#[napi]
pub fn plan_retirement(input_json: String) -> NapiResult<String> {
    call_json(&input_json, fincalc_core::retirement::plan_retirement)
}
