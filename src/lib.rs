pub mod card;
pub mod commands;
pub mod error;
pub mod export;
pub mod llm;
pub mod palette;
pub mod parser;
pub mod utils;

pub use card::{Card, CardFields, CefrLevel};
pub use error::{CardGenError, UpstreamError};
