pub mod auth;
pub mod config;
pub mod generate;
pub mod status;

pub use auth::AuthCommand;
pub use config::ConfigCommand;
pub use generate::GenerateCommand;
pub use status::StatusCommand;
