use napi::Result as NapiResult;
use napi_derive::napi;

use ifrs16_core::lease_accounting::{measurement, schedule};
use ifrs16_core::LeaseTerms;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_terms(input_json: &str) -> NapiResult<LeaseTerms> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Lease measurement
// ---------------------------------------------------------------------------

#[napi]
pub fn measure_lease(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = measurement::measure_lease(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn lease_schedule(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let rows = schedule::build_schedule(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&rows).map_err(to_napi_error)
}

#[napi]
pub fn lease_present_value(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let pv = schedule::compute_present_value(&terms).map_err(to_napi_error)?;
    Ok(pv.to_string())
}

#[napi]
pub fn lease_depreciation(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let dep = schedule::compute_straight_line_depreciation(&terms).map_err(to_napi_error)?;
    Ok(dep.to_string())
}
