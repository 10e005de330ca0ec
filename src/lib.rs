pub mod app_state;
pub mod config;
pub mod delivery;
pub mod detector;
pub mod extractor;
pub mod health;
pub mod logging;
pub mod messages;
pub mod normalizer;
pub mod pipeline;
pub mod resolver;
pub mod routes;
pub mod template;
