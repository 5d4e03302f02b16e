//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracker_core::error::CoreError;
use tracker_core::types::DbId;
use tracker_core::validation::validate_name;
use tracker_db::models::category::{
    Category, CategoryDetail, CategoryWithProgress, CreateCategory, UpdateCategory,
};
use tracker_db::models::project::ProjectFilter;
use tracker_db::progress::{categories_with_progress, category_detail};
use tracker_db::repositories::{CategoryRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// Each category carries its project count and mean project progress.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryWithProgress>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    let projects = ProjectRepo::list_summaries(&state.pool, &ProjectFilter::default()).await?;
    Ok(Json(DataResponse {
        data: categories_with_progress(categories, &projects),
    }))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    validate_name(&input.name, "name")?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, "Category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CategoryDetail>>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    let filter = ProjectFilter {
        category_id: Some(id),
        status: None,
    };
    let projects = ProjectRepo::list_summaries(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: category_detail(category, projects),
    }))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    if let Some(name) = &input.name {
        validate_name(name, "name")?;
    }
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Returns 409 while projects still belong to the category.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(category_id = id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}
