pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod database;
pub mod endpoints;
pub mod errors;
pub mod http;
pub mod remote;
pub mod routes;
pub mod telemetry;
pub mod threadpool;
