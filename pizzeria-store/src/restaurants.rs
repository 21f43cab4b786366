use diesel::{insert_into, prelude::*};

use crate::error::StoreError;
use crate::models::{NewRestaurant, Restaurant, RestaurantChanges, RestaurantPizza};
use crate::schema::{restaurant_pizzas, restaurants};

pub fn list(conn: &mut SqliteConnection) -> Result<Vec<Restaurant>, StoreError> {
    let results = restaurants::table
        .order(restaurants::id.asc())
        .select(Restaurant::as_select())
        .load(conn)?;
    Ok(results)
}

pub fn find(conn: &mut SqliteConnection, restaurant_id: i32) -> Result<Restaurant, StoreError> {
    let result = restaurants::table
        .find(restaurant_id)
        .select(Restaurant::as_select())
        .first(conn)?;
    Ok(result)
}

/// Loads a restaurant together with the pizzas it offers.
pub fn find_with_pizzas(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<(Restaurant, Vec<RestaurantPizza>), StoreError> {
    conn.transaction::<_, StoreError, _>(|conn| {
        let restaurant = find(conn, restaurant_id)?;
        let offerings = RestaurantPizza::belonging_to(&restaurant)
            .order(restaurant_pizzas::id.asc())
            .select(RestaurantPizza::as_select())
            .load(conn)?;
        Ok((restaurant, offerings))
    })
}

pub fn create(
    conn: &mut SqliteConnection,
    restaurant: &NewRestaurant,
) -> Result<Restaurant, StoreError> {
    let created = insert_into(restaurants::table)
        .values(restaurant)
        .returning(Restaurant::as_returning())
        .get_result(conn)?;
    Ok(created)
}

pub fn update(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
    changes: &RestaurantChanges,
) -> Result<Restaurant, StoreError> {
    conn.transaction::<_, StoreError, _>(|conn| {
        let restaurant = find(conn, restaurant_id)?;
        if changes.is_empty() {
            return Ok(restaurant);
        }
        let updated = diesel::update(&restaurant)
            .set(changes)
            .returning(Restaurant::as_returning())
            .get_result(conn)?;
        Ok(updated)
    })
}

/// Deletes a restaurant and every pizza offering that references it.
pub fn delete(conn: &mut SqliteConnection, restaurant_id: i32) -> Result<(), StoreError> {
    conn.transaction::<_, StoreError, _>(|conn| {
        let restaurant = find(conn, restaurant_id)?;
        diesel::delete(
            restaurant_pizzas::table.filter(restaurant_pizzas::restaurant_id.eq(restaurant.id)),
        )
        .execute(conn)?;
        diesel::delete(&restaurant).execute(conn)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPizza, NewRestaurantPizza};
    use crate::test_support::connection;
    use crate::{pizzas, restaurant_pizzas as offerings};

    fn new_restaurant(name: &str, address: &str) -> NewRestaurant {
        NewRestaurant {
            name: name.to_string(),
            address: address.to_string(),
        }
    }

    #[test]
    fn test_create_and_find_restaurant() {
        let conn = &mut connection();

        let created = create(conn, &new_restaurant("Sottocasa NYC", "298 Atlantic Ave")).unwrap();
        assert_eq!(created.name, "Sottocasa NYC");
        assert_eq!(created.address, "298 Atlantic Ave");

        let found = find(conn, created.id).unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn test_find_missing_restaurant() {
        let conn = &mut connection();
        assert!(matches!(find(conn, 42), Err(StoreError::NotFound)));
        assert!(matches!(find_with_pizzas(conn, 42), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_list_restaurants_in_id_order() {
        let conn = &mut connection();
        create(conn, &new_restaurant("First", "1 Main St")).unwrap();
        create(conn, &new_restaurant("Second", "2 Main St")).unwrap();

        let names = list(conn)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_update_only_given_fields() {
        let conn = &mut connection();
        let created = create(conn, &new_restaurant("Old Name", "Old Address")).unwrap();

        let renamed = update(
            conn,
            created.id,
            &RestaurantChanges {
                name: Some("New Name".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(renamed.name, "New Name");
        assert_eq!(renamed.address, "Old Address");

        let moved = update(
            conn,
            created.id,
            &RestaurantChanges {
                address: Some("New Address".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(moved.name, "New Name");
        assert_eq!(moved.address, "New Address");

        let unchanged = update(conn, created.id, &RestaurantChanges::default()).unwrap();
        assert_eq!(unchanged, moved);
    }

    #[test]
    fn test_update_missing_restaurant() {
        let conn = &mut connection();
        let result = update(
            conn,
            7,
            &RestaurantChanges {
                name: Some("Nobody".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[test]
    fn test_delete_restaurant_removes_offerings() {
        let conn = &mut connection();
        let restaurant = create(conn, &new_restaurant("Doomed", "Nowhere")).unwrap();
        let pizza = pizzas::create(
            conn,
            &NewPizza {
                name: "Cheese".to_string(),
                ingredients: "Dough, Tomato Sauce, Cheese".to_string(),
            },
        )
        .unwrap();
        let (offering, _, _) = offerings::create(
            conn,
            &NewRestaurantPizza {
                price: 10.0,
                restaurant_id: restaurant.id,
                pizza_id: pizza.id,
            },
        )
        .unwrap();

        let (_, listed) = find_with_pizzas(conn, restaurant.id).unwrap();
        assert_eq!(listed, vec![offering.clone()]);

        delete(conn, restaurant.id).unwrap();

        assert!(matches!(find(conn, restaurant.id), Err(StoreError::NotFound)));
        assert!(matches!(
            offerings::find(conn, offering.id),
            Err(StoreError::NotFound)
        ));
        // The pizza itself is untouched.
        assert_eq!(pizzas::find(conn, pizza.id).unwrap(), pizza);
    }

    #[test]
    fn test_delete_missing_restaurant() {
        let conn = &mut connection();
        assert!(matches!(delete(conn, 1), Err(StoreError::NotFound)));
    }
}
