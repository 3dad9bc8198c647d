//! Roll endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AppState;
use crate::error::{IronrollError, Result};
use crate::roll::RollResult;

/// Query parameters for `GET /roll`.
#[derive(Debug, Default, Deserialize)]
pub struct RollParams {
    /// Optional integer modifier, defaults to 0
    pub m: Option<String>,
}

impl RollParams {
    /// Parse the modifier. An absent or empty value means 0.
    pub fn modifier(&self) -> Result<i64> {
        match self.m.as_deref() {
            None | Some("") => Ok(0),
            Some(raw) => raw
                .parse()
                .map_err(|_| IronrollError::InvalidModifier(raw.to_string())),
        }
    }
}

/// Public JSON shape of a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResponse {
    pub action_die: u8,
    pub modifier: i64,
    pub challenge_dice: [u8; 2],
    pub total: i128,
    pub outcome: String,
}

impl From<RollResult> for RollResponse {
    fn from(r: RollResult) -> Self {
        Self {
            action_die: r.action_die,
            modifier: r.modifier,
            challenge_dice: r.challenge_dice,
            total: r.total,
            outcome: r.outcome.to_string(),
        }
    }
}

/// Handle `GET /roll`.
///
/// Responds 200 with the roll as JSON, or 400 if `m` is not an integer.
pub async fn roll_handler(
    State(state): State<AppState>,
    Query(params): Query<RollParams>,
) -> Result<Json<RollResponse>> {
    let modifier = params.modifier()?;
    let result = state.engine.roll(modifier);

    debug!(
        modifier = modifier,
        total = result.total,
        outcome = %result.outcome,
        "Roll served"
    );

    Ok(Json(result.into()))
}
