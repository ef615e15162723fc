use clap::{Parser, Subcommand};

/// Headless ajax-form and sign-in client for the board game club site
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a form on the page
    Submit {
        /// Page file path
        #[arg(short, long)]
        page: String,

        /// Form index or id attribute
        #[arg(short, long)]
        form: String,
    },

    /// Click the edit/delete toggle of a panel
    Toggle {
        /// Page file path
        #[arg(short, long)]
        page: String,

        /// Panel index
        #[arg(long)]
        panel: usize,
    },

    /// Click the sign-in button with a one-time code obtained from the auth provider
    Signin {
        /// Page file path
        #[arg(short, long)]
        page: String,

        /// One-time authorization code (omit to simulate a result without code)
        #[arg(long)]
        code: Option<String>,
    },

    /// Click the sign-out button
    Signout {
        /// Page file path
        #[arg(short, long)]
        page: String,
    },
}
