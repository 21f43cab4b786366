use pizzeria_store::models as db;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRestaurantRequest {
    /// Name of the restaurant
    pub name: Option<String>,
    /// Street address of the restaurant
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateRestaurantRequest {
    /// New name, left unchanged when absent
    pub name: Option<String>,
    /// New address, left unchanged when absent
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePizzaRequest {
    /// Name of the pizza
    pub name: Option<String>,
    /// Free-form ingredient list
    pub ingredients: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePizzaRequest {
    /// New name, left unchanged when absent
    pub name: Option<String>,
    /// New ingredient list, left unchanged when absent
    pub ingredients: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Pizza being offered
    pub pizza_id: Option<i32>,
    /// Restaurant offering the pizza
    pub restaurant_id: Option<i32>,
    /// Price between 1 and 30 inclusive. Kept as raw JSON so that anything
    /// that is not a number in range fails the price check.
    #[schema(value_type = Option<f64>)]
    pub price: Option<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

impl From<db::Restaurant> for Restaurant {
    fn from(r: db::Restaurant) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetails {
    pub id: i32,
    pub name: String,
    pub address: String,
    /// Pizzas offered by this restaurant
    pub restaurant_pizzas: Vec<RestaurantPizzaSummary>,
}

impl From<(db::Restaurant, Vec<db::RestaurantPizza>)> for RestaurantDetails {
    fn from((r, offerings): (db::Restaurant, Vec<db::RestaurantPizza>)) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
            restaurant_pizzas: offerings.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

impl From<db::Pizza> for Pizza {
    fn from(p: db::Pizza) -> Self {
        Self {
            id: p.id,
            name: p.name,
            ingredients: p.ingredients,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizzaSummary {
    pub id: i32,
    pub price: f64,
    pub pizza_id: i32,
    pub restaurant_id: i32,
}

impl From<db::RestaurantPizza> for RestaurantPizzaSummary {
    fn from(o: db::RestaurantPizza) -> Self {
        Self {
            id: o.id,
            price: o.price,
            pizza_id: o.pizza_id,
            restaurant_id: o.restaurant_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: f64,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: Pizza,
    pub restaurant: Restaurant,
}

impl From<(db::RestaurantPizza, db::Pizza, db::Restaurant)> for RestaurantPizza {
    fn from((o, pizza, restaurant): (db::RestaurantPizza, db::Pizza, db::Restaurant)) -> Self {
        Self {
            id: o.id,
            price: o.price,
            pizza_id: o.pizza_id,
            restaurant_id: o.restaurant_id,
            pizza: pizza.into(),
            restaurant: restaurant.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorsResponse {
    /// Error messages
    pub errors: Vec<String>,
}
