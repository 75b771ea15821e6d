pub mod config;
pub mod credentials;
pub mod logger;
pub mod parameters;
pub mod request_builder;
pub mod resolver;
pub mod routing_table;
pub mod validation;
