use crate::{
    api::{
        error::ApiError,
        response::{with_total_count, ApiResponse},
    },
    db::{balance, transaction, user, wallet},
    models::{NewBalanceSnapshot, NewTransaction, UserProfile},
    state::AppState,
    validation::{format_cursor, parse_cursor, validate_limit, validate_wallet_address},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
pub struct UpsertUserRequest {
    pub user_id: i64,
    pub chat_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Deserialize)]
pub struct WalletRequest {
    pub wallet_address: String,
    pub user_id: i64,
}

#[derive(Deserialize)]
pub struct AdvanceCursorRequest {
    pub wallet_address: String,
    pub user_id: i64,
    pub block_number: i64,
}

#[derive(Deserialize)]
pub struct TransactionsQuery {
    pub wallet_address: String,
    pub since_block: Option<String>,
    pub limit: Option<String>,
    pub cursor: Option<String>,
}

#[derive(Deserialize)]
pub struct LatestBalanceQuery {
    pub wallet_address: String,
    pub token_address: Option<String>,
}

#[derive(Serialize)]
pub struct TransactionPageBody {
    pub transactions: Vec<crate::models::TransactionRecord>,
    pub next_cursor: Option<String>,
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(upsert_user))
        .route("/users/{user_id}/wallets", get(list_user_wallets))
        .route(
            "/wallets",
            post(add_wallet)
                .get(list_tracked_wallets)
                .delete(deactivate_wallet),
        )
        .route("/wallets/cursor", put(advance_cursor))
        .route("/transactions", post(record_transaction).get(list_transactions))
        .route("/balances", post(append_balance))
        .route("/balances/latest", get(latest_balance))
        .with_state(app_state)
}

async fn health() -> &'static str {
    "ok"
}

async fn upsert_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpsertUserRequest>,
) -> Result<Response, ApiError> {
    let profile = UserProfile {
        username: req.username,
        first_name: req.first_name,
        last_name: req.last_name,
    };

    user::upsert_user(&state.db_pool, req.user_id, req.chat_id, &profile).await?;
    info!("Upserted user {}", req.user_id);

    let stored = user::get_user(&state.db_pool, req.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User vanished after upsert".to_string()))?;

    Ok(ApiResponse { data: stored }.into_response())
}

async fn list_user_wallets(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Response, ApiError> {
    let wallets = wallet::list_active_wallets(&state.db_pool, Some(user_id)).await?;
    Ok(ApiResponse { data: wallets }.into_response())
}

async fn add_wallet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WalletRequest>,
) -> Result<Response, ApiError> {
    validate_wallet_address(&req.wallet_address)?;

    let created = wallet::add_wallet(&state.db_pool, &req.wallet_address, req.user_id).await?;
    info!(
        "Registered wallet {} for user {}",
        created.wallet_address, created.user_id
    );

    Ok((StatusCode::CREATED, Json(ApiResponse { data: created })).into_response())
}

async fn list_tracked_wallets(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let wallets = wallet::list_active_with_users(&state.db_pool).await?;
    Ok(ApiResponse { data: wallets }.into_response())
}

async fn deactivate_wallet(
    State(state): State<Arc<AppState>>,
    Query(req): Query<WalletRequest>,
) -> Result<Response, ApiError> {
    validate_wallet_address(&req.wallet_address)?;

    let changed = wallet::deactivate_wallet(&state.db_pool, &req.wallet_address, req.user_id).await?;
    if changed {
        info!(
            "Deactivated wallet {} for user {}",
            req.wallet_address, req.user_id
        );
        Ok((StatusCode::OK, "Wallet deactivated").into_response())
    } else {
        Ok((StatusCode::OK, "Wallet was not active").into_response())
    }
}

async fn advance_cursor(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdvanceCursorRequest>,
) -> Result<Response, ApiError> {
    validate_wallet_address(&req.wallet_address)?;

    wallet::advance_sync_cursor(
        &state.db_pool,
        &req.wallet_address,
        req.user_id,
        req.block_number,
    )
    .await?;
    info!(
        "Advanced sync cursor for wallet {} (user {}) to block {}",
        req.wallet_address, req.user_id, req.block_number
    );

    Ok(StatusCode::OK.into_response())
}

async fn record_transaction(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewTransaction>,
) -> Result<Response, ApiError> {
    validate_wallet_address(&req.wallet_address)?;
    if req.tx_hash.trim().is_empty() {
        return Err(ApiError::BadRequest("tx_hash must not be empty".to_string()));
    }

    let outcome = transaction::record_transaction(&state.db_pool, &req).await?;
    let status = if outcome.inserted {
        info!("Recorded transaction {} (id {})", req.tx_hash, outcome.id);
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(ApiResponse { data: outcome })).into_response())
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionsQuery>,
) -> Result<Response, ApiError> {
    validate_wallet_address(&params.wallet_address)?;

    let since_block = match &params.since_block {
        None => None,
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
            ApiError::BadRequest(format!("Invalid parameter: since_block: {raw}"))
        })?),
    };
    let limit = validate_limit(
        params.limit.as_deref(),
        state.config.default_page_limit,
        state.config.max_page_limit,
    )?;
    let cursor = params.cursor.as_deref().map(parse_cursor).transpose()?;

    let page = transaction::list_transactions(
        &state.db_pool,
        &params.wallet_address,
        since_block,
        limit,
        cursor,
    )
    .await?;
    let total = transaction::count_transactions(&state.db_pool, &params.wallet_address).await?;

    let body = TransactionPageBody {
        next_cursor: page.next_cursor.as_ref().map(format_cursor),
        transactions: page.transactions,
    };

    Ok(with_total_count(body, total))
}

async fn append_balance(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewBalanceSnapshot>,
) -> Result<Response, ApiError> {
    validate_wallet_address(&req.wallet_address)?;

    let id = balance::append_snapshot(&state.db_pool, &req).await?;
    info!(
        "Appended balance snapshot {} for wallet {}",
        id, req.wallet_address
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "data": { "id": id } })),
    )
        .into_response())
}

async fn latest_balance(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LatestBalanceQuery>,
) -> Result<Response, ApiError> {
    validate_wallet_address(&params.wallet_address)?;

    let snapshot = balance::latest_balance(
        &state.db_pool,
        &params.wallet_address,
        params.token_address.as_deref(),
    )
    .await?
    .ok_or_else(|| {
        ApiError::NotFound(format!(
            "No balance recorded for wallet {}",
            params.wallet_address
        ))
    })?;

    Ok(ApiResponse { data: snapshot }.into_response())
}
