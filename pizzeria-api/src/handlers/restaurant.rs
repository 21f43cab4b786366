use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use pizzeria_store::{
    models::{NewRestaurant, RestaurantChanges},
    restaurants,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::{non_empty, present, resource_id, AppState};

const NOT_FOUND: &str = "Restaurant not found";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants).post(create_restaurant))
        .route(
            "/restaurants/{id}",
            get(get_restaurant)
                .put(update_restaurant)
                .delete(delete_restaurant),
        )
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = [Restaurant]),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let results = state.store.run(restaurants::list).await?;
    Ok(Json(results.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant with its pizza offerings", body = RestaurantDetails),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    restaurant_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<RestaurantDetails>, ApiError> {
    let restaurant_id = resource_id(restaurant_id, NOT_FOUND)?;
    let details = state
        .store
        .run(move |conn| restaurants::find_with_pizzas(conn, restaurant_id))
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(Json(details.into()))
}

#[utoipa::path(
    post,
    path = "/restaurants",
    request_body = CreateRestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created successfully", body = Restaurant),
        (status = 400, description = "Name or address missing", body = ApiErrorResponse),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn create_restaurant(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Restaurant>), ApiError> {
    let Json(payload) = payload?;
    let (Some(name), Some(address)) = (non_empty(payload.name), non_empty(payload.address)) else {
        return Err(ApiError::BadRequest(
            "Name and address are required".to_string(),
        ));
    };

    let restaurant = NewRestaurant { name, address };
    let created = state
        .store
        .run(move |conn| restaurants::create(conn, &restaurant))
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/restaurants/{id}",
    request_body = UpdateRestaurantRequest,
    responses(
        (status = 200, description = "Restaurant updated successfully", body = Restaurant),
        (status = 400, description = "Field sent as an empty string", body = ApiErrorResponse),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn update_restaurant(
    State(state): State<AppState>,
    restaurant_id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateRestaurantRequest>, JsonRejection>,
) -> Result<Json<Restaurant>, ApiError> {
    let restaurant_id = resource_id(restaurant_id, NOT_FOUND)?;
    let Json(payload) = payload?;
    let changes = RestaurantChanges {
        name: present(payload.name, "Name must not be empty")?,
        address: present(payload.address, "Address must not be empty")?,
    };

    let updated = state
        .store
        .run(move |conn| restaurants::update(conn, restaurant_id, &changes))
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its pizza offerings deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    restaurant_id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let restaurant_id = resource_id(restaurant_id, NOT_FOUND)?;
    state
        .store
        .run(move |conn| restaurants::delete(conn, restaurant_id))
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(StatusCode::NO_CONTENT)
}
