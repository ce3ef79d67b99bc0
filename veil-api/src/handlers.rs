//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, info};

use veil_core::error::VeilError;

use crate::dto::*;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

// ═══════════════════════════════════════════════════════════════════════════
// Stealth Handlers
// ═══════════════════════════════════════════════════════════════════════════

/// GET /api/resolve-stealth/:ensName
pub async fn resolve_stealth(
    State(state): State<Arc<AppState>>,
    Path(ens_name): Path<String>,
) -> Result<Json<ResolveResponse>> {
    let meta = state.service.resolve(&ens_name).await?;

    Ok(Json(ResolveResponse {
        ens_name,
        meta_address: MetaAddressDto::from(&meta),
    }))
}

/// POST /api/derive-stealth
pub async fn derive_stealth(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<DeriveRequest>,
) -> Result<Json<AnnouncementDto>> {
    let meta = req
        .meta_address
        .as_ref()
        .ok_or_else(|| VeilError::InvalidMetaAddress("metaAddress is required".into()))?
        .parse()?;

    let announcement = state.service.derive(&req.ens_name, &meta).await?;
    Ok(Json(AnnouncementDto::from(&announcement)))
}

/// GET /api/announcements/:viewTag/:pView
pub async fn list_announcements(
    State(state): State<Arc<AppState>>,
    Path((view_tag, p_view)): Path<(String, String)>,
) -> Result<Json<Vec<AnnouncementDto>>> {
    let matching = state.service.scan(&view_tag, &p_view).await?;
    debug!(view_tag = %view_tag, count = matching.len(), "Scanned announcements");
    Ok(Json(matching.iter().map(AnnouncementDto::from).collect()))
}

/// POST /api/generate-derivation-proof
pub async fn derivation_proof(
    State(state): State<Arc<AppState>>,
    req: Option<Json<ProofRequest>>,
) -> Result<Json<ProofResponse>> {
    let id = req.and_then(|Json(r)| r.announcement_id);
    let proof = state.service.derivation_proof(id).await?;
    Ok(Json(ProofResponse { proof }))
}

/// POST /api/generate-ownership-proof
pub async fn ownership_proof(
    State(state): State<Arc<AppState>>,
    req: Option<Json<ProofRequest>>,
) -> Result<Json<ProofResponse>> {
    let id = req.and_then(|Json(r)| r.announcement_id);
    let proof = state.service.ownership_proof(id).await?;
    Ok(Json(ProofResponse { proof }))
}

// ═══════════════════════════════════════════════════════════════════════════
// Pool Handlers
// ═══════════════════════════════════════════════════════════════════════════

/// POST /api/pool/deposit
pub async fn pool_deposit(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<DepositRequest>,
) -> Result<Json<DepositResponse>> {
    let announcement_id = req.announcement_id()?;
    let amount = req.amount()?;

    let note = state.service.deposit(announcement_id, amount).await?;
    Ok(Json(DepositResponse {
        note: NoteDto::from(&note),
    }))
}

/// GET /api/pool/state
pub async fn pool_state(State(state): State<Arc<AppState>>) -> Json<PoolStateResponse> {
    Json(PoolStateResponse::from(state.service.state()))
}

/// POST /api/pool/sweep
pub async fn pool_sweep(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SweepRequest>,
) -> Result<Json<SweepResponse>> {
    let outcome = state.service.sweep(&req.p_view, &req.main_address).await?;

    if !outcome.is_empty() {
        info!(
            swept = %outcome.swept_total,
            notes = outcome.spent_note_ids.len(),
            "Pool sweep"
        );
    }

    Ok(Json(SweepResponse::from(outcome)))
}

// ═══════════════════════════════════════════════════════════════════════════
// Health
// ═══════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>> {
    let stats = state.service.stats().await?;

    Ok(Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        announcements: stats.announcements,
        notes: stats.notes,
        digest: stats.digest,
    }))
}
