use crate::api::{Food, NewFood};
use crate::errors::Result;
use crate::http::HttpClient;
use crate::routes::{food_by_id, paths};

/// Client side of the `/foods` collection resource
///
/// Each method performs exactly one request. Implementations never retry.
pub trait FoodApi {
    /// `GET /foods`
    fn list_foods(&mut self) -> Result<Vec<Food>>;

    /// `POST /foods`, returning the created food with its server-assigned id
    fn create_food(&mut self, food: &NewFood) -> Result<Food>;

    /// `PUT /foods/{id}` with the full replacement body
    fn update_food(&mut self, id: u32, food: &Food) -> Result<Food>;

    /// `DELETE /foods/{id}`
    fn delete_food(&mut self, id: u32) -> Result<()>;
}

/// `FoodApi` over HTTP, opening one connection per request
pub struct HttpFoodApi {
    address: String,
}

impl HttpFoodApi {
    /// Client for the server listening on `<host>:<port>`
    pub fn new(address: &str) -> HttpFoodApi {
        HttpFoodApi {
            address: address.to_string(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn send(&self, method: &str, endpoint: &str, body: &str) -> Result<String> {
        let mut client = HttpClient::new(&self.address)?;
        let response = client.send(method, endpoint, body)?.error_for_status()?;
        Ok(response.body)
    }
}

impl FoodApi for HttpFoodApi {
    fn list_foods(&mut self) -> Result<Vec<Food>> {
        let body = self.send("GET", paths::FOODS, "")?;
        Ok(serde_json::from_str(&body)?)
    }

    fn create_food(&mut self, food: &NewFood) -> Result<Food> {
        let body = self.send("POST", paths::FOODS, &serde_json::to_string(food)?)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn update_food(&mut self, id: u32, food: &Food) -> Result<Food> {
        let body = self.send("PUT", &food_by_id(id), &serde_json::to_string(food)?)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn delete_food(&mut self, id: u32) -> Result<()> {
        self.send("DELETE", &food_by_id(id), "")?;
        Ok(())
    }
}

pub mod mock {
    use super::*;
    use crate::database::FoodStore;
    use crate::errors::Error;

    /// In-process `FoodApi` backed by a store, with failure injection
    ///
    /// Every call is recorded in `calls` as `"<METHOD> <path>"`, failed ones included.
    pub struct LocalFoodApi<S: FoodStore> {
        pub store: S,
        pub calls: Vec<String>,
        fail_next: usize,
    }

    impl<S: FoodStore> LocalFoodApi<S> {
        pub fn new(store: S) -> Self {
            LocalFoodApi {
                store,
                calls: Vec::new(),
                fail_next: 0,
            }
        }

        /// Make the next `count` calls fail with a transport error, without reaching the store
        pub fn fail_next(&mut self, count: usize) {
            self.fail_next = count;
        }

        fn record(&mut self, method: &str, path: &str) -> Result<()> {
            self.calls.push(format!("{} {}", method, path));
            if self.fail_next > 0 {
                self.fail_next -= 1;
                return Err(Error::ConnectionReset);
            }
            Ok(())
        }
    }

    impl<S: FoodStore> FoodApi for LocalFoodApi<S> {
        fn list_foods(&mut self) -> Result<Vec<Food>> {
            self.record("GET", paths::FOODS)?;
            self.store.list_foods()
        }

        fn create_food(&mut self, food: &NewFood) -> Result<Food> {
            self.record("POST", paths::FOODS)?;
            self.store.insert_food(food.clone())
        }

        fn update_food(&mut self, id: u32, food: &Food) -> Result<Food> {
            self.record("PUT", &food_by_id(id))?;
            self.store.replace_food(id, NewFood::from(food.clone()))
        }

        fn delete_food(&mut self, id: u32) -> Result<()> {
            self.record("DELETE", &food_by_id(id))?;
            self.store.delete_food(id).map(|_| ())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::database::mock::MockDB;
    use crate::database::FoodStore;
    use crate::endpoints::{create_http_router, handle};
    use crate::errors::Error;
    use crate::http::HttpServer;

    fn beans() -> NewFood {
        NewFood {
            name: "Beans".to_string(),
            description: "Black beans".to_string(),
            price: "3.20".to_string(),
            available: false,
            image: "beans.png".to_string(),
        }
    }

    /// Serve `requests` connections on an ephemeral port against a fresh mock store
    fn spawn_server(requests: usize) -> (String, std::thread::JoinHandle<()>) {
        let server = HttpServer::new("127.0.0.1:0").unwrap();
        let addr = server.local_addr().unwrap().to_string();
        let handle = std::thread::spawn(move || {
            let router = create_http_router().unwrap();
            let mut db = MockDB::new().unwrap();
            for _ in 0..requests {
                server
                    .serve_once(|req| handle(&router, req, &mut db))
                    .unwrap();
            }
        });
        (addr, handle)
    }

    #[test]
    fn test_http_food_api() {
        let (addr, server) = spawn_server(6);
        let mut api = HttpFoodApi::new(&addr);

        assert!(api.list_foods().unwrap().is_empty());

        let created = api.create_food(&beans()).unwrap();
        assert_eq!(created.id, 1);
        assert!(!created.available);

        let mut changed = created.clone();
        changed.available = true;
        let updated = api.update_food(created.id, &changed).unwrap();
        assert_eq!(updated, changed);

        api.delete_food(created.id).unwrap();
        assert!(matches!(api.delete_food(created.id), Err(Error::Status(404))));

        assert!(api.list_foods().unwrap().is_empty());
        server.join().unwrap();
    }

    #[test]
    fn test_dashboard_over_http() {
        use crate::dashboard::{Dashboard, Outcome, SyncPolicy};

        let (addr, server) = spawn_server(4);
        let mut dashboard = Dashboard::new(HttpFoodApi::new(&addr), SyncPolicy::default());

        dashboard.mount().unwrap();
        assert!(dashboard.items().is_empty());

        assert_eq!(dashboard.add_food(beans()).unwrap(), Outcome::Applied);
        let created = dashboard.items()[0].clone();
        assert!(created.available);

        dashboard.edit_food(created.clone());
        let update = crate::api::FoodUpdate {
            price: Some("2.80".to_string()),
            ..Default::default()
        };
        assert_eq!(dashboard.update_food(update).unwrap(), Outcome::Applied);
        assert_eq!(dashboard.items()[0].price, "2.80");
        assert_eq!(dashboard.items()[0].name, created.name);

        assert_eq!(dashboard.delete_food(created.id).unwrap(), Outcome::Applied);
        assert!(dashboard.items().is_empty());
        server.join().unwrap();
    }

    #[test]
    fn test_http_food_api_unreachable() {
        // bind then drop to get a port nobody listens on
        let addr = {
            let server = HttpServer::new("127.0.0.1:0").unwrap();
            server.local_addr().unwrap().to_string()
        };
        let mut api = HttpFoodApi::new(&addr);
        assert!(matches!(api.list_foods(), Err(Error::Io(_))));
    }

    #[test]
    fn test_local_food_api_failure_injection() {
        let mut api = mock::LocalFoodApi::new(MockDB::new().unwrap());
        api.fail_next(1);

        assert!(api.create_food(&beans()).is_err());
        assert!(api.store.list_foods().unwrap().is_empty());

        let created = api.create_food(&beans()).unwrap();
        api.delete_food(created.id).unwrap();

        assert_eq!(
            api.calls,
            vec!["POST /foods", "POST /foods", "DELETE /foods/1"]
        );
    }
}
