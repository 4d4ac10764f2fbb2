//! Route handlers.
//!
//! Query parameters arrive as raw strings so that malformed numbers are
//! reported with the parameter name rather than as a generic rejection.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use mipsim_core::sim::{LoadReport, ResetOptions, SourceFormat, StateView};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::task;
use tracing::info;

use crate::SharedSimulator;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoadQuery {
    start: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StepQuery {
    cycles: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResetQuery {
    clear_regs: Option<String>,
    clear_mem: Option<String>,
    pc: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StepResponse {
    cycles: u64,
    cycle: u64,
}

/// Absent and empty parameters both mean "use the default".
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses a decimal or `0x` hexadecimal address.
fn parse_addr(name: &'static str, value: Option<&str>) -> Result<Option<u32>, ApiError> {
    let Some(text) = present(value) else {
        return Ok(None);
    };
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map(Some).map_err(|_| ApiError::BadParam {
        name,
        value: text.to_owned(),
    })
}

fn parse_count(name: &'static str, value: Option<&str>) -> Result<Option<u64>, ApiError> {
    present(value)
        .map(|text| {
            text.parse().map_err(|_| ApiError::BadParam {
                name,
                value: text.to_owned(),
            })
        })
        .transpose()
}

/// `1`, `true` and `yes` (any case) are true; everything else is false.
fn flag(value: Option<&str>) -> bool {
    present(value).is_some_and(|v| {
        v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
    })
}

pub(crate) async fn health() -> &'static str {
    "OK"
}

pub(crate) async fn state(State(sim): State<SharedSimulator>) -> Json<StateView> {
    Json(sim.lock().await.state())
}

pub(crate) async fn load(
    State(sim): State<SharedSimulator>,
    Query(query): Query<LoadQuery>,
    body: Bytes,
) -> Result<Json<LoadReport>, ApiError> {
    let text = std::str::from_utf8(&body)?;
    let start = parse_addr("start", query.start.as_deref())?;
    let mut sim = sim.lock().await;
    let start = start.unwrap_or(sim.config().general.start_pc);
    let report = sim.load(text, start, SourceFormat::Auto)?;
    Ok(Json(report))
}

pub(crate) async fn step(
    State(sim): State<SharedSimulator>,
    Query(query): Query<StepQuery>,
) -> Result<Json<StepResponse>, ApiError> {
    let cycles = parse_count("cycles", query.cycles.as_deref())?
        .unwrap_or(1)
        .max(1);
    let mut sim = sim.lock_owned().await;
    let max = sim.config().pipeline.max_step_cycles;
    if cycles > max {
        return Err(ApiError::TooManyCycles {
            requested: cycles,
            max,
        });
    }
    let cycle = task::spawn_blocking(move || {
        sim.run(cycles);
        sim.cycle()
    })
    .await?;
    info!(cycles, cycle, "stepped");
    Ok(Json(StepResponse { cycles, cycle }))
}

pub(crate) async fn reset(
    State(sim): State<SharedSimulator>,
    Query(query): Query<ResetQuery>,
) -> Result<Json<Value>, ApiError> {
    let pc = parse_addr("pc", query.pc.as_deref())?;
    let mut sim = sim.lock().await;
    let options = ResetOptions {
        clear_regs: flag(query.clear_regs.as_deref()),
        clear_mem: flag(query.clear_mem.as_deref()),
        pc: pc.unwrap_or(sim.config().general.start_pc),
    };
    sim.reset(options)?;
    Ok(Json(json!({ "ok": true })))
}

pub(crate) async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
