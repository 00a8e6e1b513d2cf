//! CLI module for the account service
//!
//! Subcommands:
//! - `serve`: run the HTTP API (default)
//! - `init-db`: create the PostgreSQL users table

pub mod init_db;
pub mod serve;

use clap::{Parser, Subcommand};

/// Account Service - user records, credentials and per-user artifacts
#[derive(Parser)]
#[command(name = "account-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default)
    Serve,

    /// Create the users table in PostgreSQL
    InitDb,
}
