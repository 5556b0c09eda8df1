// Library exports for testing and external use

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod startup;
pub mod telemetry;
