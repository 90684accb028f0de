use crate::api::NewFood;
use crate::database::FoodStore;
use crate::errors::{Error, Result};
use crate::http::{Request, Response};
use crate::routes::*;

/// Router serving the `/foods` collection
pub fn create_http_router() -> Result<HttpRouter> {
    let mut router = HttpRouter::new()?;

    router.add_route("GET", endpoints::FOODS, list_foods);
    router.add_route("POST", endpoints::FOODS, create_food);
    router.add_route("GET", endpoints::FOOD_BY_ID, get_food);
    router.add_route("PUT", endpoints::FOOD_BY_ID, update_food);
    router.add_route("DELETE", endpoints::FOOD_BY_ID, delete_food);

    Ok(router)
}

/// Route a request and turn handler errors into bare error responses
pub fn handle(router: &HttpRouter, request: Request, db: &mut dyn FoodStore) -> Response {
    match router.route(request, db) {
        Ok(response) => response,
        Err(err) => {
            let code = err.status_code();
            if code >= 500 {
                tracing::error!(error = %err, "request failed");
            } else {
                tracing::debug!(error = %err, code, "request rejected");
            }
            Response::error(code)
        }
    }
}

fn food_id(params: &HttpParams) -> Result<u32> {
    params
        .get(params::FOOD_ID)
        .ok_or_else(|| Error::BadRequest("Missing food_id".to_string()))
        .and_then(|id| {
            id.parse::<u32>()
                .map_err(|err| Error::BadRequest(format!("Invalid food_id {}: {}", id, err)))
        })
}

fn list_foods(_: Request, _: HttpParams, db: &mut dyn FoodStore) -> Result<Response> {
    let foods = db.list_foods()?;
    Ok(Response::json(serde_json::to_string(&foods)?))
}

fn get_food(_: Request, params: HttpParams, db: &mut dyn FoodStore) -> Result<Response> {
    let food = db.get_food(food_id(&params)?)?;
    Ok(Response::json(serde_json::to_string(&food)?))
}

fn create_food(request: Request, _: HttpParams, db: &mut dyn FoodStore) -> Result<Response> {
    let new_food: NewFood = serde_json::from_str(&request.body)?;
    let food = db.insert_food(new_food)?;
    tracing::info!(id = food.id, name = %food.name, "food created");
    Ok(Response::created(serde_json::to_string(&food)?))
}

/// Full replacement of a food. The id in the path wins over any id in the body.
fn update_food(request: Request, params: HttpParams, db: &mut dyn FoodStore) -> Result<Response> {
    let id = food_id(&params)?;
    let replacement: NewFood = serde_json::from_str(&request.body)?;
    let food = db.replace_food(id, replacement)?;
    tracing::info!(id, "food updated");
    Ok(Response::json(serde_json::to_string(&food)?))
}

fn delete_food(_: Request, params: HttpParams, db: &mut dyn FoodStore) -> Result<Response> {
    let id = food_id(&params)?;
    db.delete_food(id)?;
    tracing::info!(id, "food deleted");
    Ok(Response::ok())
}
