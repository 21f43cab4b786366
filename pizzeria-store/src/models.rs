use std::ops::RangeInclusive;

use diesel::prelude::*;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};

/// Prices a restaurant may charge for a pizza, inclusive on both ends.
pub const PRICE_RANGE: RangeInclusive<f64> = 1.0..=30.0;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

/// Partial update of a restaurant. `None` leaves the column untouched.
#[derive(AsChangeset, Default, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct RestaurantChanges {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl RestaurantChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none()
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza {
    pub name: String,
    pub ingredients: String,
}

/// Partial update of a pizza. `None` leaves the column untouched.
#[derive(AsChangeset, Default, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct PizzaChanges {
    pub name: Option<String>,
    pub ingredients: Option<String>,
}

impl PizzaChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.ingredients.is_none()
    }
}

/// A pizza offered at a restaurant at a given price.
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: f64,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    pub price: f64,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}
