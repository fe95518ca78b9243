// HTTP routes
pub mod health;
pub mod purge;

pub use health::*;
pub use purge::*;
