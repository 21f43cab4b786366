use diesel::{insert_into, prelude::*};

use crate::error::StoreError;
use crate::models::{NewPizza, Pizza, PizzaChanges};
use crate::schema::{pizzas, restaurant_pizzas};

pub fn list(conn: &mut SqliteConnection) -> Result<Vec<Pizza>, StoreError> {
    let results = pizzas::table
        .order(pizzas::id.asc())
        .select(Pizza::as_select())
        .load(conn)?;
    Ok(results)
}

pub fn find(conn: &mut SqliteConnection, pizza_id: i32) -> Result<Pizza, StoreError> {
    let result = pizzas::table
        .find(pizza_id)
        .select(Pizza::as_select())
        .first(conn)?;
    Ok(result)
}

pub fn create(conn: &mut SqliteConnection, pizza: &NewPizza) -> Result<Pizza, StoreError> {
    let created = insert_into(pizzas::table)
        .values(pizza)
        .returning(Pizza::as_returning())
        .get_result(conn)?;
    Ok(created)
}

pub fn update(
    conn: &mut SqliteConnection,
    pizza_id: i32,
    changes: &PizzaChanges,
) -> Result<Pizza, StoreError> {
    conn.transaction::<_, StoreError, _>(|conn| {
        let pizza = find(conn, pizza_id)?;
        if changes.is_empty() {
            return Ok(pizza);
        }
        let updated = diesel::update(&pizza)
            .set(changes)
            .returning(Pizza::as_returning())
            .get_result(conn)?;
        Ok(updated)
    })
}

pub fn delete(conn: &mut SqliteConnection, pizza_id: i32) -> Result<(), StoreError> {
    conn.transaction::<_, StoreError, _>(|conn| {
        let pizza = find(conn, pizza_id)?;
        diesel::delete(restaurant_pizzas::table.filter(restaurant_pizzas::pizza_id.eq(pizza.id)))
            .execute(conn)?;
        diesel::delete(&pizza).execute(conn)?;
        Ok(())
    })
}
