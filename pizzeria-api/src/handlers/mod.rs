pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::{
    extract::{rejection::PathRejection, Path},
    response::Json,
    routing::get,
    Router,
};
use pizzeria_store::Store;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .route("/api-docs/openapi.json", get(openapi))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Keeps absent fields as `None` and rejects fields sent as empty strings.
fn present(field: Option<String>, message: &str) -> Result<Option<String>, ApiError> {
    match field {
        Some(value) if value.is_empty() => Err(ApiError::BadRequest(message.to_string())),
        field => Ok(field),
    }
}

/// An id segment that is not a valid `i32` names no resource.
fn resource_id(id: Result<Path<i32>, PathRejection>, not_found: &str) -> Result<i32, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|_| ApiError::NotFound(not_found.to_string()))
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::create_restaurant,
        restaurant::update_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        pizza::get_pizza,
        pizza::create_pizza,
        pizza::update_pizza,
        pizza::delete_pizza,
        restaurant_pizza::create_restaurant_pizza,
        restaurant_pizza::delete_restaurant_pizza,
    ),
    components(
        schemas(
            crate::models::CreateRestaurantRequest,
            crate::models::UpdateRestaurantRequest,
            crate::models::Restaurant,
            crate::models::RestaurantDetails,
            crate::models::CreatePizzaRequest,
            crate::models::UpdatePizzaRequest,
            crate::models::Pizza,
            crate::models::CreateRestaurantPizzaRequest,
            crate::models::RestaurantPizza,
            crate::models::RestaurantPizzaSummary,
            crate::models::ApiErrorResponse,
            crate::models::ApiErrorsResponse
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant management endpoints"),
        (name = "pizzas", description = "Pizza management endpoints"),
        (name = "restaurant_pizzas", description = "Pizza offerings and prices per restaurant")
    ),
    info(
        title = "Pizzeria API",
        description = "Restaurants, pizzas and what each restaurant charges for them",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
