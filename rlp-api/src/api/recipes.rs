//! Recipe CRUD and search handlers
//!
//! Each handler validates its input completely before touching the store, so
//! a rejected request never applies a partial change.

use axum::{extract::State, Extension, Json};
use rlp_common::pagination::calculate_pagination;
use rlp_common::validation::{validate_new_recipe, validate_recipe_patch, validate_search_criteria};
use rlp_common::RecipeWithRelations;
use serde::Serialize;
use tracing::info;

use super::envelope::ApiResponse;
use super::extract::{JsonObject, QueryParams, RecipeId};
use super::RequestContext;
use crate::db;
use crate::error::ApiError;
use crate::AppState;

type RecipeResponse = Result<Json<ApiResponse<RecipeWithRelations>>, ApiError>;
type RecipeListResponse = Result<Json<ApiResponse<Vec<RecipeWithRelations>>>, ApiError>;

/// Payload of a successful DELETE
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: i64,
    pub deleted: bool,
}

/// POST /recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    JsonObject(body): JsonObject,
) -> RecipeResponse {
    let recipe = validate_new_recipe(&body)?;
    let created = db::create_recipe(&state.db, &recipe).await?;

    info!(
        request_id = %ctx.request_id,
        recipe_id = created.recipe.id,
        name = %created.recipe.name,
        job = %created.recipe.job,
        "Recipe created"
    );
    Ok(Json(ApiResponse::data(created)))
}

/// GET /recipes
///
/// Plain listing when no filter is given, otherwise the same filtered search
/// as `/recipes/search`.
pub async fn list_recipes(
    State(state): State<AppState>,
    QueryParams(params): QueryParams,
) -> RecipeListResponse {
    let criteria = validate_search_criteria(&params)?;
    let (items, total) = if criteria.has_filters() {
        db::search(&state.db, &criteria).await?
    } else {
        db::list_page(&state.db, criteria.page).await?
    };

    let meta = calculate_pagination(total, criteria.page);
    Ok(Json(ApiResponse::paged(items, meta)))
}

/// GET /recipes/search
pub async fn search_recipes(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    QueryParams(params): QueryParams,
) -> RecipeListResponse {
    let criteria = validate_search_criteria(&params)?;
    let (items, total) = db::search(&state.db, &criteria).await?;

    info!(
        request_id = %ctx.request_id,
        total,
        returned = items.len(),
        "Recipe search"
    );
    let meta = calculate_pagination(total, criteria.page);
    Ok(Json(ApiResponse::paged(items, meta)))
}

/// GET /recipes/:id
pub async fn get_recipe(State(state): State<AppState>, RecipeId(id): RecipeId) -> RecipeResponse {
    let recipe = db::get_recipe(&state.db, id).await?;
    Ok(Json(ApiResponse::data(recipe)))
}

/// PUT /recipes/:id
///
/// Fields absent from the body keep their stored values.
pub async fn update_recipe(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    RecipeId(id): RecipeId,
    JsonObject(body): JsonObject,
) -> RecipeResponse {
    let patch = validate_recipe_patch(&body)?;
    let updated = db::update_recipe(&state.db, id, &patch).await?;

    info!(request_id = %ctx.request_id, recipe_id = id, "Recipe updated");
    Ok(Json(ApiResponse::data(updated)))
}

/// DELETE /recipes/:id
pub async fn delete_recipe(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    RecipeId(id): RecipeId,
) -> Result<Json<ApiResponse<Deleted>>, ApiError> {
    if !db::delete_recipe(&state.db, id).await? {
        return Err(ApiError::not_found(format!("Recipe {} not found", id)));
    }

    info!(request_id = %ctx.request_id, recipe_id = id, "Recipe deleted");
    Ok(Json(ApiResponse::data(Deleted { id, deleted: true })))
}
