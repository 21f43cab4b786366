use diesel::{insert_into, prelude::*};

use crate::error::StoreError;
use crate::models::{NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza};
use crate::schema::restaurant_pizzas;
use crate::{pizzas, restaurants};

/// Inserts an offering and loads the pizza and restaurant it points at.
///
/// References are not checked beforehand. A dangling `pizza_id` or
/// `restaurant_id` is rejected by the foreign key constraint and the whole
/// transaction is rolled back.
pub fn create(
    conn: &mut SqliteConnection,
    offering: &NewRestaurantPizza,
) -> Result<(RestaurantPizza, Pizza, Restaurant), StoreError> {
    conn.transaction::<_, StoreError, _>(|conn| {
        let created = insert_into(restaurant_pizzas::table)
            .values(offering)
            .returning(RestaurantPizza::as_returning())
            .get_result(conn)?;
        let pizza = pizzas::find(conn, created.pizza_id)?;
        let restaurant = restaurants::find(conn, created.restaurant_id)?;
        Ok((created, pizza, restaurant))
    })
}

pub fn find(conn: &mut SqliteConnection, offering_id: i32) -> Result<RestaurantPizza, StoreError> {
    let result = restaurant_pizzas::table
        .find(offering_id)
        .select(RestaurantPizza::as_select())
        .first(conn)?;
    Ok(result)
}

pub fn delete(conn: &mut SqliteConnection, offering_id: i32) -> Result<(), StoreError> {
    conn.transaction::<_, StoreError, _>(|conn| {
        let offering = find(conn, offering_id)?;
        diesel::delete(&offering).execute(conn)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPizza, NewRestaurant};
    use crate::test_support::connection;

    fn seed(conn: &mut SqliteConnection) -> (Restaurant, Pizza) {
        let restaurant = restaurants::create(
            conn,
            &NewRestaurant {
                name: "Sottocasa NYC".to_string(),
                address: "298 Atlantic Ave, Brooklyn, NY 11201".to_string(),
            },
        )
        .unwrap();
        let pizza = pizzas::create(
            conn,
            &NewPizza {
                name: "Emma".to_string(),
                ingredients: "Dough, Tomato Sauce, Cheese".to_string(),
            },
        )
        .unwrap();
        (restaurant, pizza)
    }

    #[test]
    fn test_create_offering_loads_relations() {
        let conn = &mut connection();
        let (restaurant, pizza) = seed(conn);

        let (offering, offered_pizza, offering_restaurant) = create(
            conn,
            &NewRestaurantPizza {
                price: 15.0,
                restaurant_id: restaurant.id,
                pizza_id: pizza.id,
            },
        )
        .unwrap();

        assert_eq!(offering.price, 15.0);
        assert_eq!(offering.restaurant_id, restaurant.id);
        assert_eq!(offering.pizza_id, pizza.id);
        assert_eq!(offered_pizza, pizza);
        assert_eq!(offering_restaurant, restaurant);
        assert_eq!(find(conn, offering.id).unwrap(), offering);
    }

    #[test]
    fn test_duplicate_offerings_are_allowed() {
        let conn = &mut connection();
        let (restaurant, pizza) = seed(conn);
        let offering = NewRestaurantPizza {
            price: 5.0,
            restaurant_id: restaurant.id,
            pizza_id: pizza.id,
        };

        let (first, _, _) = create(conn, &offering).unwrap();
        let (second, _, _) = create(conn, &offering).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_fractional_price_round_trips() {
        let conn = &mut connection();
        let (restaurant, pizza) = seed(conn);

        let (created, _, _) = create(
            conn,
            &NewRestaurantPizza {
                price: 12.5,
                restaurant_id: restaurant.id,
                pizza_id: pizza.id,
            },
        )
        .unwrap();

        assert_eq!(created.price, 12.5);
        assert_eq!(find(conn, created.id).unwrap().price, 12.5);
    }

    #[test]
    fn test_create_offering_with_dangling_reference() {
        let conn = &mut connection();
        let (restaurant, _) = seed(conn);

        let result = create(
            conn,
            &NewRestaurantPizza {
                price: 10.0,
                restaurant_id: restaurant.id,
                pizza_id: 999,
            },
        );

        assert!(matches!(result, Err(StoreError::Query(_))));
        let (_, listed) = restaurants::find_with_pizzas(conn, restaurant.id).unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn test_price_check_constraint() {
        let conn = &mut connection();
        let (restaurant, pizza) = seed(conn);

        for price in [0.0, 0.5, 30.5, 31.0] {
            let result = create(
                conn,
                &NewRestaurantPizza {
                    price,
                    restaurant_id: restaurant.id,
                    pizza_id: pizza.id,
                },
            );
            assert!(matches!(result, Err(StoreError::Query(_))), "price {price}");
        }
    }

    #[test]
    fn test_delete_offering() {
        let conn = &mut connection();
        let (restaurant, pizza) = seed(conn);
        let (offering, _, _) = create(
            conn,
            &NewRestaurantPizza {
                price: 30.0,
                restaurant_id: restaurant.id,
                pizza_id: pizza.id,
            },
        )
        .unwrap();

        delete(conn, offering.id).unwrap();

        assert!(matches!(find(conn, offering.id), Err(StoreError::NotFound)));
        assert!(matches!(delete(conn, offering.id), Err(StoreError::NotFound)));
        // Parents survive.
        assert_eq!(restaurants::find(conn, restaurant.id).unwrap(), restaurant);
        assert_eq!(pizzas::find(conn, pizza.id).unwrap(), pizza);
    }
}
