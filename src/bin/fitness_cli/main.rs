// ABOUTME: Fitness CLI - terminal front end for the PKCE login and the activity backend
// ABOUTME: Each invocation resumes the session persisted in the session file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Start a login and open the printed URL in a browser
//! fitness-cli login
//!
//! # Paste the address the browser was redirected to
//! fitness-cli callback 'http://localhost:5173/?state=...&code=...'
//!
//! # Show who is signed in
//! fitness-cli status
//!
//! # Work with activities
//! fitness-cli activities list
//! fitness-cli activities add --type RUNNING --duration 30
//! fitness-cli activities recommendation <activity-id>
//! fitness-cli activities delete <activity-id>
//!
//! # End the session
//! fitness-cli logout
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fitness_client::config::ClientConfig;
use fitness_client::logging::LoggingConfig;
use std::path::PathBuf;
use tracing::debug;

use commands::AppContext;

#[derive(Parser)]
#[command(
    name = "fitness-cli",
    about = "Fitness activity tracker CLI",
    long_about = "Sign in to the fitness tracker with OAuth2 PKCE and manage your activities and AI recommendations."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Session file override
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Start a login and print the identity provider URL to open
    Login,

    /// Finish a login from the address the provider redirected to
    Callback {
        /// Full redirect address including `code` and `state`
        url: String,
    },

    /// Show the signed-in user
    Status,

    /// Obtain a new access token with the stored refresh token
    Refresh,

    /// Clear the session and print the provider logout URL
    Logout,

    /// Activity management commands
    Activities {
        #[command(subcommand)]
        action: ActivityCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ActivityCommand {
    /// List all activities
    List,

    /// Show one activity
    Show {
        /// Activity ID
        activity_id: String,
    },

    /// Log a new activity
    Add {
        /// Activity type (RUNNING, CYCLING, SWIMMING, WALKING, YOGA, STRETCHING)
        #[arg(long = "type")]
        activity_type: String,

        /// Duration in minutes
        #[arg(long)]
        duration: u32,

        /// Body weight in kilograms
        #[arg(long)]
        weight: Option<f64>,

        /// Height in centimeters
        #[arg(long)]
        height: Option<f64>,

        /// Gender
        #[arg(long)]
        gender: Option<String>,
    },

    /// Show the AI recommendation for an activity
    Recommendation {
        /// Activity ID
        activity_id: String,
    },

    /// Delete an activity together with its recommendation
    Delete {
        /// Activity ID
        activity_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    let mut config = ClientConfig::from_env();
    if let Some(path) = cli.session_file {
        config.session_file = Some(path);
    }
    let context = AppContext::new(config)?;
    debug!(session_file = %context.session_path().display(), "Session file resolved");

    match cli.command {
        Command::Login => commands::auth::login(&context)?,
        Command::Callback { url } => commands::auth::callback(&context, &url).await?,
        Command::Status => commands::auth::status(&context).await?,
        Command::Refresh => commands::auth::refresh(&context).await?,
        Command::Logout => commands::auth::logout(&context)?,
        Command::Activities { action } => match action {
            ActivityCommand::List => commands::activities::list(&context).await?,
            ActivityCommand::Show { activity_id } => {
                commands::activities::show(&context, &activity_id).await?;
            }
            ActivityCommand::Add {
                activity_type,
                duration,
                weight,
                height,
                gender,
            } => {
                commands::activities::add(
                    &context,
                    &activity_type,
                    duration,
                    weight,
                    height,
                    gender,
                )
                .await?;
            }
            ActivityCommand::Recommendation { activity_id } => {
                commands::activities::recommendation(&context, &activity_id).await?;
            }
            ActivityCommand::Delete { activity_id } => {
                commands::activities::delete(&context, &activity_id).await?;
            }
        },
    }

    Ok(())
}
