mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use novelaictl::session::{self, KeyringStore};
use novelaictl::{ApiClient, ClientConfig, RequestBody, UrlParameters};
use tracing::warn;

use crate::cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    dotenv::dotenv().ok();

    let args = Args::parse();
    logging::setup_logging(args.verbose);

    let store = KeyringStore::for_account(&args.account);
    let config = ClientConfig::from_env()?;

    // Only login and logout need the credential store; every other command
    // goes ahead without a token when it cannot be read.
    let access_token = match &store {
        Ok(store) => session::load_access_token_or_empty(store),
        Err(err) => {
            warn!(error = %err, "credential storage unavailable, continuing without a token");
            String::new()
        }
    };
    let client = ApiClient::new(config.with_access_token(access_token));

    let response = match args.command {
        Command::Login => {
            session::login(&client, &store?).await?;
            println!("Logged in.");
            return Ok(());
        }
        Command::Logout => {
            session::logout(&store?)?;
            println!("Logged out.");
            return Ok(());
        }
        Command::Ping => client.get_test_connection().await?,
        Command::Info => client.get_user_information().await?,
        Command::Modules => client.get_ai_module_all().await?,
        Command::Call {
            method,
            path,
            body,
            raw_body,
            query,
        } => {
            let body = match (body, raw_body) {
                (Some(json), _) => Some(RequestBody::Json(
                    serde_json::from_str(&json).context("--body must be valid JSON")?,
                )),
                (None, Some(raw)) => Some(RequestBody::Raw(raw)),
                (None, None) => None,
            };
            let query: UrlParameters = query.into_iter().collect();

            client
                .call_raw(&method, &path, body.as_ref(), Some(&query))
                .await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
