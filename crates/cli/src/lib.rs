//! Command-line front end for the pizzaria storefront.

pub mod args;
pub mod commands;
pub mod config;
pub mod render;

pub use args::{Cli, Command, DiscountArgs};
pub use commands::{App, Interrupt};
pub use config::Config;
