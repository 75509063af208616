use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "balachka")]
#[command(about = "Account client for the Balachka chat service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new account
    Register,
    /// Log in and store the session token
    Login,
    /// Log out and clear stored credentials
    Logout,
    /// Show who is currently logged in
    Whoami,
    /// Update profile fields
    Profile,
}
