//! Dice API routes
//!
//! Rolling, ingestion of externally resolved rolls, history, willpower
//! rerolls, V5 special checks, opposed and extended rolls, and roll settings.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::{
    ContestedRollDto, ContestedV5RequestDto, ExtendedRollDto, ExtendedV20RequestDto,
    FrenzyCheckDto, FrenzyCheckRequestDto, InvalidRollInput, RemorseCheckDto,
    RemorseCheckRequestDto, RerollRequestDto, RerollResponseDto, ResistedV20RequestDto,
    RollRequestDto, RollResultDto, RouseCheckDto, RouseCheckRequestDto, V20RollInput,
    V20RollRequestDto, V5RollInput, V5RollRequestDto, WillpowerRollRequestDto,
};
use crate::application::services::DiceServiceError;
use crate::domain::entities::RollResult;
use crate::domain::value_objects::{RollId, RollSettings};
use crate::infrastructure::state::AppState;

fn parse_roll_id(id: &str) -> Result<RollId, (StatusCode, String)> {
    Uuid::parse_str(id)
        .map(RollId::from_uuid)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid roll ID".to_string()))
}

fn dice_error(e: DiceServiceError) -> (StatusCode, String) {
    match e {
        DiceServiceError::ResultNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
    }
}

fn input_error(e: InvalidRollInput) -> (StatusCode, String) {
    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

// ============================================================================
// Rolling
// ============================================================================

/// Roll a V5 pool
pub async fn roll_v5(
    State(state): State<Arc<AppState>>,
    Json(req): Json<V5RollRequestDto>,
) -> (StatusCode, Json<RollResultDto>) {
    let result = state.dice.write().await.roll_v5(req.into());
    (StatusCode::CREATED, Json(RollResultDto::from(&result)))
}

/// Roll a V20 pool
pub async fn roll_v20(
    State(state): State<Arc<AppState>>,
    Json(req): Json<V20RollRequestDto>,
) -> (StatusCode, Json<RollResultDto>) {
    let result = state.dice.write().await.roll_v20(req.into());
    (StatusCode::CREATED, Json(RollResultDto::from(&result)))
}

/// Roll the remembered settings under the active rule set
pub async fn roll_with_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RollRequestDto>,
) -> (StatusCode, Json<RollResultDto>) {
    let result = state.dice.write().await.roll_with_settings(req.description);
    (StatusCode::CREATED, Json(RollResultDto::from(&result)))
}

/// Roll willpower alone; stored like any V5 roll
pub async fn willpower_roll(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WillpowerRollRequestDto>,
) -> (StatusCode, Json<RollResultDto>) {
    let result = state
        .dice
        .write()
        .await
        .willpower_roll(req.willpower, req.difficulty, req.description);
    (StatusCode::CREATED, Json(RollResultDto::from(&result)))
}

/// Store a V5 roll resolved elsewhere
pub async fn ingest_v5(
    State(state): State<Arc<AppState>>,
    Json(input): Json<V5RollInput>,
) -> Result<(StatusCode, Json<RollResultDto>), (StatusCode, String)> {
    let result = RollResult::try_from(input).map_err(input_error)?;
    let result = state.dice.write().await.ingest(result);
    Ok((StatusCode::CREATED, Json(RollResultDto::from(&result))))
}

/// Store a V20 roll resolved elsewhere
pub async fn ingest_v20(
    State(state): State<Arc<AppState>>,
    Json(input): Json<V20RollInput>,
) -> Result<(StatusCode, Json<RollResultDto>), (StatusCode, String)> {
    let result = RollResult::try_from(input).map_err(input_error)?;
    let result = state.dice.write().await.ingest(result);
    Ok((StatusCode::CREATED, Json(RollResultDto::from(&result))))
}

// ============================================================================
// History
// ============================================================================

/// List stored rolls, newest first
pub async fn list_history(State(state): State<Arc<AppState>>) -> Json<Vec<RollResultDto>> {
    let dice = state.dice.read().await;
    Json(dice.history().map(RollResultDto::from).collect())
}

/// Get a stored roll by ID
pub async fn get_roll(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RollResultDto>, (StatusCode, String)> {
    let id = parse_roll_id(&id)?;
    let dice = state.dice.read().await;
    let result = dice.get(id).map_err(dice_error)?;
    Ok(Json(RollResultDto::from(result)))
}

/// Clear the history
pub async fn clear_history(State(state): State<Arc<AppState>>) -> StatusCode {
    state.dice.write().await.clear_history();
    StatusCode::NO_CONTENT
}

/// Spend willpower to reroll up to three regular dice of a stored V5 roll
pub async fn reroll(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<RerollRequestDto>,
) -> Result<Json<RerollResponseDto>, (StatusCode, String)> {
    let id = parse_roll_id(&id)?;
    let report = state
        .dice
        .write()
        .await
        .confirm_reroll(id, req.into())
        .map_err(dice_error)?;
    Ok(Json(RerollResponseDto::from(report)))
}

// ============================================================================
// V5 checks
// ============================================================================

pub async fn rouse_check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RouseCheckRequestDto>,
) -> Json<RouseCheckDto> {
    Json(state.dice.read().await.rouse_check(req.reroll).into())
}

pub async fn frenzy_check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FrenzyCheckRequestDto>,
) -> Json<FrenzyCheckDto> {
    let check = state
        .dice
        .read()
        .await
        .frenzy_check(req.willpower, req.humanity, req.difficulty);
    Json(check.into())
}

pub async fn remorse_check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RemorseCheckRequestDto>,
) -> Json<RemorseCheckDto> {
    Json(state.dice.read().await.remorse_check(req.humanity, req.stains).into())
}

// ============================================================================
// Opposed and extended rolls
// ============================================================================

pub async fn contested_v5(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContestedV5RequestDto>,
) -> Json<ContestedRollDto> {
    Json(state.dice.read().await.contested_v5(req.into()).into())
}

pub async fn resisted_v20(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResistedV20RequestDto>,
) -> Json<ContestedRollDto> {
    Json(state.dice.read().await.resisted_v20(req.into()).into())
}

pub async fn extended_v20(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtendedV20RequestDto>,
) -> Json<ExtendedRollDto> {
    Json(state.dice.read().await.extended_v20(req.into()).into())
}

// ============================================================================
// Settings
// ============================================================================

pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<RollSettings> {
    Json(state.dice.read().await.settings().clone())
}

/// Replace the roll settings; out-of-range values are clamped
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<RollSettings>,
) -> Json<RollSettings> {
    Json(state.dice.write().await.update_settings(settings))
}

pub async fn reset_settings(State(state): State<Arc<AppState>>) -> Json<RollSettings> {
    Json(state.dice.write().await.reset_settings())
}
