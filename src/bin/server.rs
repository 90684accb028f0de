use common::config::Config;
use common::database::sqlite::SQLiteConnection;
use common::database::FoodStore;
use common::endpoints::{create_http_router, handle};
use common::errors::Result;
use common::http::{HttpServer, Response};
use common::telemetry;
use std::sync::{Arc, Mutex};

fn run() -> Result<()> {
    let config = Config::from_env()?;

    let db = match &config.database {
        Some(path) => {
            tracing::info!(path = %path.display(), "opening database");
            SQLiteConnection::open(path)?
        }
        None => {
            tracing::info!("using an in-memory database");
            SQLiteConnection::new()?
        }
    };
    let db = Arc::new(Mutex::new(db));
    let router = Arc::new(create_http_router()?);

    let server = HttpServer::new(&config.address)?;
    server.serve(move |request| match db.lock() {
        Ok(mut db) => handle(&router, request, &mut *db),
        Err(_) => {
            tracing::error!("database lock poisoned");
            Response::internal_server_error()
        }
    })
}

fn main() {
    telemetry::init();

    if let Err(err) = run() {
        tracing::error!(error = %err, "server stopped");
        std::process::exit(1);
    }
}
