use crate::api::{Food, NewFood};
use crate::database::FoodStore;
use crate::errors::{Error, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// Contains the SQL queries used to interact with the database
pub mod sql_queries {
    pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS foods (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        price TEXT NOT NULL,
        available INTEGER NOT NULL,
        image TEXT NOT NULL
    )";

    pub const INSERT_FOOD: &str =
        "INSERT INTO foods (name, description, price, available, image) VALUES (?1, ?2, ?3, ?4, ?5)";
    pub const SELECT_FOODS: &str =
        "SELECT id, name, description, price, available, image FROM foods ORDER BY id";
    pub const SELECT_FOOD: &str =
        "SELECT id, name, description, price, available, image FROM foods WHERE id = ?1";
    pub const UPDATE_FOOD: &str =
        "UPDATE foods SET name = ?2, description = ?3, price = ?4, available = ?5, image = ?6 WHERE id = ?1";
    pub const DELETE_FOOD: &str = "DELETE FROM foods WHERE id = ?1";
}

/// SQLite-backed food store
pub struct SQLiteConnection {
    conn: Connection,
}

impl SQLiteConnection {
    /// Open (or create) a database file and make sure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(sql_queries::CREATE_TABLE, [])?;
        Ok(SQLiteConnection { conn })
    }
}

/// Map a row selected with the column order of the queries above
fn food_from_row(row: &Row) -> rusqlite::Result<Food> {
    Ok(Food {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        available: row.get(4)?,
        image: row.get(5)?,
    })
}

fn not_found(id: u32) -> Error {
    Error::NotFound(format!("No food with id {}", id))
}

impl FoodStore for SQLiteConnection {
    fn new() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn list_foods(&self) -> Result<Vec<Food>> {
        let mut stmt = self.conn.prepare(sql_queries::SELECT_FOODS)?;
        let foods = stmt
            .query_map([], food_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(foods)
    }

    fn get_food(&self, id: u32) -> Result<Food> {
        self.conn
            .query_row(sql_queries::SELECT_FOOD, params![id], food_from_row)
            .optional()?
            .ok_or_else(|| not_found(id))
    }

    fn insert_food(&mut self, food: NewFood) -> Result<Food> {
        let tx = self.conn.transaction()?;
        tx.execute(
            sql_queries::INSERT_FOOD,
            params![
                food.name,
                food.description,
                food.price,
                food.available,
                food.image
            ],
        )?;
        // Ids are exposed as u32, a row that can't be addressed is rolled back with `tx`
        let rowid = tx.last_insert_rowid();
        let id = u32::try_from(rowid)
            .map_err(|_| Error::Database(rusqlite::Error::IntegralValueOutOfRange(0, rowid)))?;
        tx.commit()?;
        Ok(Food::from_new(id, food))
    }

    fn replace_food(&mut self, id: u32, food: NewFood) -> Result<Food> {
        let changed = self.conn.execute(
            sql_queries::UPDATE_FOOD,
            params![
                id,
                food.name,
                food.description,
                food.price,
                food.available,
                food.image
            ],
        )?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(Food::from_new(id, food))
    }

    fn delete_food(&mut self, id: u32) -> Result<Food> {
        let tx = self.conn.transaction()?;
        let food = tx
            .query_row(sql_queries::SELECT_FOOD, params![id], food_from_row)
            .optional()?
            .ok_or_else(|| not_found(id))?;
        tx.execute(sql_queries::DELETE_FOOD, params![id])?;
        tx.commit()?;
        Ok(food)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn new_food(name: &str, price: &str) -> NewFood {
        NewFood {
            name: name.to_string(),
            description: String::new(),
            price: price.to_string(),
            available: false,
            image: String::new(),
        }
    }

    #[test]
    fn test_sqlite_store() {
        let mut db = SQLiteConnection::new().unwrap();
        assert!(db.list_foods().unwrap().is_empty());

        let rice = db.insert_food(new_food("Rice", "4.50")).unwrap();
        let beans = db.insert_food(new_food("Beans", "3.20")).unwrap();
        assert_eq!(rice.id, 1);
        assert_eq!(beans.id, 2);

        let foods = db.list_foods().unwrap();
        assert_eq!(foods, vec![rice.clone(), beans.clone()]);
        assert!(!foods[0].available);

        let mut updated = new_food("Rice", "5.00");
        updated.available = true;
        let stored = db.replace_food(rice.id, updated).unwrap();
        assert_eq!(db.get_food(rice.id).unwrap(), stored);
        assert!(stored.available);

        assert!(matches!(
            db.replace_food(99, new_food("Soup", "1.00")),
            Err(Error::NotFound(_))
        ));

        assert_eq!(db.delete_food(rice.id).unwrap(), stored);
        assert!(matches!(db.delete_food(rice.id), Err(Error::NotFound(_))));
        assert!(matches!(db.get_food(rice.id), Err(Error::NotFound(_))));

        // AUTOINCREMENT never reuses an id
        assert_eq!(db.insert_food(new_food("Soup", "2.00")).unwrap().id, 3);
    }

    #[test]
    fn test_insert_past_u32_ids_is_rolled_back() {
        let mut db = SQLiteConnection::new().unwrap();
        db.conn
            .execute(
                "INSERT INTO foods (id, name, description, price, available, image) \
                 VALUES (?1, 'Last', '', '1.00', 1, '')",
                params![u32::MAX],
            )
            .unwrap();

        let err = db.insert_food(new_food("Rice", "4.50")).unwrap_err();
        assert!(matches!(err, Error::Database(_)));
        assert_eq!(err.status_code(), 500);

        let foods = db.list_foods().unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].id, u32::MAX);
    }

    #[test]
    fn test_sqlite_file_persistence() {
        let path = std::env::temp_dir().join(format!(
            "food-dashboard-test-{}.sqlite",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let mut db = SQLiteConnection::open(&path).unwrap();
            db.insert_food(new_food("Rice", "4.50")).unwrap();
        }

        let db = SQLiteConnection::open(&path).unwrap();
        assert_eq!(db.list_foods().unwrap()[0].name, "Rice");

        drop(db);
        let _ = std::fs::remove_file(&path);
    }
}
