mod interface;
mod snowflake;
mod utils;

pub use interface::*;
pub use snowflake::*;
