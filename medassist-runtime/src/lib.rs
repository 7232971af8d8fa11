pub mod config_store;
pub mod defaults;
pub mod http_backend;
pub mod runtime_client;
