//! Transport-agnostic request boundary.
//!
//! A host (HTTP handler, CLI, message consumer) passes the raw request body in and
//! writes the returned status and JSON body out. Client mistakes map to 400,
//! anything else to 500 with a generic message; details go to the log only.

use crate::error::CashflowSimError;
use crate::schema::{Event, SimulationRequest};
use crate::utils::{deserialize_null_default, deserialize_optional_date};
use crate::CashflowSimulator;
use chrono::{NaiveDate, SecondsFormat, Utc};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SERVICE_NAME: &str = "cashflowsim";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, error: &str, message: impl Into<String>) -> Self {
        let body = ErrorBody {
            error: error.to_string(),
            message: Some(message.into()),
        };
        Self {
            status,
            body: json!(body),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Wire form of a simulation request. Window dates are optional here so that a
/// missing bound is reported as such instead of as a parse failure.
#[derive(Debug, Deserialize)]
struct SimulateBody {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    events: Vec<Event>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    initial_balance: f64,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    sim_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    sim_end: Option<NaiveDate>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SimulationService;

impl SimulationService {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_simulate(&self, body: &str) -> ApiResponse {
        let parsed: SimulateBody = match serde_json::from_str(body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Rejected simulation request: {}", e);
                return ApiResponse::error(
                    400,
                    "invalid_json",
                    format!("Failed to parse request body: {}", e),
                );
            }
        };

        let (Some(sim_start), Some(sim_end)) = (parsed.sim_start, parsed.sim_end) else {
            warn!("Rejected simulation request: missing window bounds");
            return ApiResponse::error(400, "missing_dates", "sim_start and sim_end are required");
        };

        if sim_start > sim_end {
            warn!(
                "Rejected simulation request: sim_start {} after sim_end {}",
                sim_start, sim_end
            );
            return ApiResponse::error(
                400,
                "invalid_range",
                "sim_start must be before or equal to sim_end",
            );
        }

        let request = SimulationRequest {
            events: parsed.events,
            initial_balance: parsed.initial_balance,
            sim_start,
            sim_end,
        };

        match CashflowSimulator::run(&request) {
            Ok(response) => {
                info!(
                    "Simulation produced {} ledger entries",
                    response.cashflows.len()
                );
                match serde_json::to_value(&response) {
                    Ok(body) => ApiResponse::ok(body),
                    Err(e) => Self::failure(&CashflowSimError::from(e)),
                }
            }
            Err(e) => Self::failure(&e),
        }
    }

    fn failure(err: &CashflowSimError) -> ApiResponse {
        if err.is_client_error() {
            warn!("Simulation rejected: {}", err);
            ApiResponse::error(400, err.code(), err.to_string())
        } else {
            error!("Simulation error: {}", err);
            ApiResponse::error(500, "simulation_failed", "An unexpected error occurred")
        }
    }

    pub fn health(&self) -> ApiResponse {
        ApiResponse::ok(json!({
            "status": "ok",
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }))
    }

    pub fn service_info(&self) -> ApiResponse {
        ApiResponse::ok(json!({
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "status": "running",
        }))
    }
}
