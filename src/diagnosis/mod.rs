pub mod gateway;
pub mod parse;
pub mod prompt;

pub use gateway::{GatewayClient, GatewayError};
pub use parse::parse_diagnosis;
