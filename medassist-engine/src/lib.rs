pub mod client;
pub mod error;
pub mod pending;
pub mod traits;
pub mod view;
