pub mod endpoints;
pub mod parse;
pub mod request;
pub mod runtime;
