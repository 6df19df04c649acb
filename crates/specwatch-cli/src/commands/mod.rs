//! Command implementations.

pub mod discover;
pub mod health;
pub mod run;

pub use self::discover::execute_discover;
pub use self::health::execute_agent_health;
pub use self::run::execute_run;
