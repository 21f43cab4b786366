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
    models::{NewPizza, PizzaChanges},
    pizzas,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::{non_empty, present, resource_id, AppState};

const NOT_FOUND: &str = "Pizza not found";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pizzas", get(list_pizzas).post(create_pizza))
        .route(
            "/pizzas/{id}",
            get(get_pizza).put(update_pizza).delete(delete_pizza),
        )
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = [Pizza]),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<Pizza>>, ApiError> {
    let results = state.store.run(pizzas::list).await?;
    Ok(Json(results.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/pizzas/{id}",
    responses(
        (status = 200, description = "Pizza details", body = Pizza),
        (status = 404, description = "Pizza not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Pizza ID")
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn get_pizza(
    State(state): State<AppState>,
    pizza_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Pizza>, ApiError> {
    let pizza_id = resource_id(pizza_id, NOT_FOUND)?;
    let pizza = state
        .store
        .run(move |conn| pizzas::find(conn, pizza_id))
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(Json(pizza.into()))
}

#[utoipa::path(
    post,
    path = "/pizzas",
    request_body = CreatePizzaRequest,
    responses(
        (status = 201, description = "Pizza created successfully", body = Pizza),
        (status = 400, description = "Name or ingredients missing", body = ApiErrorResponse),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn create_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreatePizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Pizza>), ApiError> {
    let Json(payload) = payload?;
    let (Some(name), Some(ingredients)) =
        (non_empty(payload.name), non_empty(payload.ingredients))
    else {
        return Err(ApiError::BadRequest(
            "Name and ingredients are required".to_string(),
        ));
    };

    let pizza = NewPizza { name, ingredients };
    let created = state
        .store
        .run(move |conn| pizzas::create(conn, &pizza))
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/pizzas/{id}",
    request_body = UpdatePizzaRequest,
    responses(
        (status = 200, description = "Pizza updated successfully", body = Pizza),
        (status = 400, description = "Field sent as an empty string", body = ApiErrorResponse),
        (status = 404, description = "Pizza not found", body = ApiErrorResponse),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Pizza ID")
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn update_pizza(
    State(state): State<AppState>,
    pizza_id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdatePizzaRequest>, JsonRejection>,
) -> Result<Json<Pizza>, ApiError> {
    let pizza_id = resource_id(pizza_id, NOT_FOUND)?;
    let Json(payload) = payload?;
    let changes = PizzaChanges {
        name: present(payload.name, "Name must not be empty")?,
        ingredients: present(payload.ingredients, "Ingredients must not be empty")?,
    };

    let updated = state
        .store
        .run(move |conn| pizzas::update(conn, pizza_id, &changes))
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/pizzas/{id}",
    responses(
        (status = 204, description = "Pizza deleted"),
        (status = 404, description = "Pizza not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Pizza ID")
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn delete_pizza(
    State(state): State<AppState>,
    pizza_id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let pizza_id = resource_id(pizza_id, NOT_FOUND)?;
    state
        .store
        .run(move |conn| pizzas::delete(conn, pizza_id))
        .await
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(StatusCode::NO_CONTENT)
}
