use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
    routing::{delete, post},
    Router,
};
use pizzeria_store::{
    models::{NewRestaurantPizza, PRICE_RANGE},
    restaurant_pizzas,
};
use tracing::{error, instrument};

use crate::error::ApiError;
use crate::models::*;

use super::{resource_id, AppState};

const NOT_FOUND: &str = "RestaurantPizza not found";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurant_pizzas", post(create_restaurant_pizza))
        .route("/restaurant_pizzas/{id}", delete(delete_restaurant_pizza))
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Pizza offered at the restaurant", body = RestaurantPizza),
        (status = 400, description = "Price out of range or references missing", body = ApiErrorsResponse),
        (status = 500, description = "Offering could not be stored", body = ApiErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizza>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::InvalidEntry(rejection.body_text()))?;

    let price = payload
        .price
        .as_ref()
        .and_then(|price| price.as_f64())
        .filter(|price| PRICE_RANGE.contains(price))
        .ok_or_else(|| ApiError::InvalidEntry("Price must be between 1 and 30.".to_string()))?;
    let (Some(pizza_id), Some(restaurant_id)) = (payload.pizza_id, payload.restaurant_id) else {
        return Err(ApiError::InvalidEntry(
            "Pizza and restaurant are required.".to_string(),
        ));
    };

    let offering = NewRestaurantPizza {
        price,
        restaurant_id,
        pizza_id,
    };
    let created = state
        .store
        .run(move |conn| restaurant_pizzas::create(conn, &offering))
        .await
        .map_err(|e| {
            error!(error = %e, "failed to create restaurant pizza");
            ApiError::EntryRejected
        })?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    delete,
    path = "/restaurant_pizzas/{id}",
    responses(
        (status = 204, description = "Offering removed"),
        (status = 404, description = "RestaurantPizza not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "RestaurantPizza ID")
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant_pizza(
    State(state): State<AppState>,
    offering_id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let offering_id = resource_id(offering_id, NOT_FOUND)?;
    state
        .store
        .run(move |conn| restaurant_pizzas::delete(conn, offering_id))
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(StatusCode::NO_CONTENT)
}
