//! Handlers for `/vaxal/inventory`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use vaxal_core::error::CoreError;
use vaxal_core::inventory::{validate_stock_quantity, validate_unit_price, MoveDirection};
use vaxal_core::types::DbId;
use vaxal_db::models::inventory::{
    CreateInventoryItem, InventoryItem, PriceHistory, UpdateInventoryItem,
};
use vaxal_db::repositories::inventory_repo::MoveOutcome;
use vaxal_db::repositories::InventoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireManager, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub moved: bool,
    /// The neighbour whose position was swapped, when `moved` is true.
    pub swapped_with: Option<DbId>,
}

/// GET /api/vaxal/inventory
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<InventoryItem>>>> {
    let items = InventoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/vaxal/inventory
pub async fn create(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Json(input): Json<CreateInventoryItem>,
) -> AppResult<(StatusCode, Json<DataResponse<InventoryItem>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    validate_unit_price(input.unit_price)?;
    if let Some(quantity) = input.stock_quantity {
        validate_stock_quantity(quantity)?;
    }

    let item = InventoryRepo::create(&state.pool, &input, Utc::now()).await?;
    tracing::info!(
        item_id = item.id,
        display_order = item.display_order,
        "Inventory item created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/vaxal/inventory/{id}
///
/// A changed `unit_price` closes the open price history row and opens a new
/// one in the same transaction.
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInventoryItem>,
) -> AppResult<Json<DataResponse<InventoryItem>>> {
    if let Some(price) = input.unit_price {
        validate_unit_price(price)?;
    }
    if let Some(quantity) = input.stock_quantity {
        validate_stock_quantity(quantity)?;
    }

    let item = InventoryRepo::update(&state.pool, id, &input, Utc::now())
        .await?
        .ok_or_else(|| AppError::not_found("InventoryItem", id))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/vaxal/inventory/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if InventoryRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("InventoryItem", id))
    }
}

/// POST /api/vaxal/inventory/{id}/move
///
/// Swaps display positions with the nearest neighbour. At the top (up) or
/// bottom (down) this is a no-op answering `moved: false`.
pub async fn move_item(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<MoveRequest>,
) -> AppResult<Json<DataResponse<MoveResponse>>> {
    let outcome = InventoryRepo::move_item(&state.pool, id, input.direction)
        .await?
        .ok_or_else(|| AppError::not_found("InventoryItem", id))?;

    let response = match outcome {
        MoveOutcome::Swapped { with } => {
            tracing::debug!(
                item_id = id,
                with,
                direction = input.direction.as_str(),
                "Inventory item moved"
            );
            MoveResponse {
                moved: true,
                swapped_with: Some(with),
            }
        }
        MoveOutcome::AtEdge => MoveResponse {
            moved: false,
            swapped_with: None,
        },
    };
    Ok(Json(DataResponse { data: response }))
}

/// GET /api/vaxal/inventory/{id}/price-history
pub async fn price_history(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PriceHistory>>>> {
    InventoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("InventoryItem", id))?;
    let history = InventoryRepo::price_history(&state.pool, id).await?;
    Ok(Json(DataResponse { data: history }))
}
