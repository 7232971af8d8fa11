pub mod article;
pub mod config;
pub mod responses;
pub mod text;
pub mod transcript;
pub mod types;

// Keep the public surface small and intentional.
pub use article::*;
pub use config::*;
pub use responses::*;
pub use text::*;
pub use transcript::*;
pub use types::*;
