//! CLI for the Groomery Gateway

pub mod serve;

use clap::{Parser, Subcommand};

/// Groomery Gateway - cached AI backgrounds and chat forwarding for the salon site
#[derive(Parser)]
#[command(name = "groomery-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP gateway
    Serve,
}
