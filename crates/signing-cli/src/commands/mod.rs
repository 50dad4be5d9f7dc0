//! Command implementations for signing-cli

pub mod run;
pub mod validate;

pub use run::run_script;
pub use validate::run_validate;
