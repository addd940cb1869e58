use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use service::errors::ServiceError;
use service::foods::{FoodRecord, ENTITY};

use crate::errors::ApiError;
use crate::routes::AppState;

#[derive(Serialize, Deserialize, Debug)]
pub struct FoodList {
    pub foods: Vec<FoodRecord>,
}

#[derive(Deserialize, Debug)]
pub struct CreateFoodInput {
    pub netid: String,
    pub food: String,
}

#[derive(Deserialize, Debug)]
pub struct UpdateFoodInput {
    pub food: String,
}

/// Parse a JSON body regardless of the request's content type.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("invalid request body: {e}")))
}

pub async fn list_foods(State(state): State<AppState>) -> Json<FoodList> {
    Json(FoodList { foods: state.foods.list().await })
}

pub async fn get_food(
    State(state): State<AppState>,
    Path(netid): Path<String>,
) -> Result<Json<FoodRecord>, ApiError> {
    Ok(Json(state.foods.get(&netid).await?))
}

pub async fn create_food(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<FoodRecord>), ApiError> {
    let input: CreateFoodInput = parse_body(&body)?;
    let record = state.foods.create(FoodRecord::new(input.netid, input.food)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_food(
    State(state): State<AppState>,
    Path(netid): Path<String>,
    body: Bytes,
) -> Result<Json<FoodRecord>, ApiError> {
    // unknown netid wins over a bad body
    if !state.foods.contains(&netid).await {
        return Err(ServiceError::not_found(ENTITY).into());
    }
    let input: UpdateFoodInput = parse_body(&body)?;
    Ok(Json(state.foods.update(&netid, input.food).await?))
}

pub async fn delete_food(
    State(state): State<AppState>,
    Path(netid): Path<String>,
) -> Result<Json<FoodRecord>, ApiError> {
    Ok(Json(state.foods.delete(&netid).await?))
}
