//! CLI commands

mod changelog;
mod init;
mod validate;

pub use changelog::ChangelogCommand;
pub use init::InitCommand;
pub use validate::{ValidateCommand, ValidationFailed};
