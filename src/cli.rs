use clap::{Parser, Subcommand};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Exchange the access key for a token and store it
    Login,

    /// Forget the stored token
    Logout,

    /// Check that the API is reachable
    Ping,

    /// Show account information
    Info,

    /// List trained modules
    Modules,

    /// Send an arbitrary request and print the decoded response
    Call {
        /// HTTP verb: GET, POST, PUT, PATCH or DELETE
        method: String,

        /// Path appended to the base URL, e.g. /user/data
        path: String,

        /// JSON request body
        #[arg(long, conflicts_with = "raw_body")]
        body: Option<String>,

        /// Request body sent exactly as given
        #[arg(long)]
        raw_body: Option<String>,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },
}

/// Define the application arguments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Keyring account the token is stored under
    #[arg(long, default_value = novelaictl::session::DEFAULT_ACCOUNT)]
    pub account: String,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected key=value, got {input:?}")),
    }
}
