//! Test harness for CLI integration tests.
//!
//! Provides isolated database environments, direct store seeding,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::KvaultCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
