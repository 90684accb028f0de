use crate::api::{Food, NewFood};
use crate::errors::Result;

pub mod sqlite;

/// Trait hiding the storage behind the `/foods` collection
///
/// The mock backs unit tests, SQLite backs the server. Ids are always assigned by the store.
pub trait FoodStore {
    /// Create a new empty store
    fn new() -> Result<Self>
    where
        Self: Sized;

    /// Every food in the store, ordered by id
    fn list_foods(&self) -> Result<Vec<Food>>;

    /// Retrieve the food with the given id
    ///
    /// Returns a NotFound error if there is no such food
    fn get_food(&self, id: u32) -> Result<Food>;

    /// Insert a new food and return it with its freshly assigned id
    fn insert_food(&mut self, food: NewFood) -> Result<Food>;

    /// Replace every field of the food with the given id
    ///
    /// Returns the stored food, or a NotFound error if there is no such food
    fn replace_food(&mut self, id: u32, food: NewFood) -> Result<Food>;

    /// Delete the food with the given id and return it
    ///
    /// Returns a NotFound error if there is no such food
    fn delete_food(&mut self, id: u32) -> Result<Food>;
}

pub mod mock {

    use super::*;
    use crate::errors::Error;

    /// In-memory store. Ids start at 1 and are never reused.
    pub struct MockDB {
        foods: Vec<Food>,
        next_id: u32,
    }

    impl MockDB {
        /// Store pre-filled with the given foods, each receiving a new id
        pub fn with_foods<I>(foods: I) -> Result<Self>
        where
            I: IntoIterator<Item = NewFood>,
        {
            let mut db = MockDB::new()?;
            for food in foods {
                db.insert_food(food)?;
            }
            Ok(db)
        }
    }

    fn not_found(id: u32) -> Error {
        Error::NotFound(format!("No food with id {}", id))
    }

    impl FoodStore for MockDB {
        fn new() -> Result<Self> {
            Ok(MockDB {
                foods: Vec::new(),
                next_id: 1,
            })
        }

        fn list_foods(&self) -> Result<Vec<Food>> {
            Ok(self.foods.clone())
        }

        fn get_food(&self, id: u32) -> Result<Food> {
            self.foods
                .iter()
                .find(|food| food.id == id)
                .cloned()
                .ok_or_else(|| not_found(id))
        }

        fn insert_food(&mut self, food: NewFood) -> Result<Food> {
            let food = Food::from_new(self.next_id, food);
            self.next_id += 1;
            self.foods.push(food.clone());
            Ok(food)
        }

        fn replace_food(&mut self, id: u32, food: NewFood) -> Result<Food> {
            let slot = self
                .foods
                .iter_mut()
                .find(|stored| stored.id == id)
                .ok_or_else(|| not_found(id))?;
            *slot = Food::from_new(id, food);
            Ok(slot.clone())
        }

        fn delete_food(&mut self, id: u32) -> Result<Food> {
            let index = self
                .foods
                .iter()
                .position(|food| food.id == id)
                .ok_or_else(|| not_found(id))?;
            Ok(self.foods.remove(index))
        }
    }

}
