use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hrchat", version, about = "HR assistant chat client", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Backend and session settings shared by every command.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Backend base URL.
    #[arg(long, global = true, env = "HRCHAT_API_URL")]
    pub api_url: Option<String>,

    /// Per-attempt timeout in seconds.
    #[arg(long, global = true, env = "HRCHAT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Retries after the first attempt for network failures.
    #[arg(long, global = true, env = "HRCHAT_RETRY_ATTEMPTS")]
    pub retries: Option<u32>,

    /// File holding the session cookie (default: user data directory).
    #[arg(long, global = true, env = "HRCHAT_SESSION_FILE")]
    pub session_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        employee_id: String,

        /// Prompted for on stdin when omitted.
        #[arg(long, env = "HRCHAT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Send one message, or start an interactive chat without one
    Chat { message: Option<String> },
    /// Show backend health
    Health,
    /// Check that the backend is reachable
    Ping,
    /// Show leave balance (defaults to the signed-in user)
    Balance { employee_id: Option<String> },
    /// Show leave history (defaults to the signed-in user)
    History { employee_id: Option<String> },
    /// Show backend system status
    Status,
    /// Inspect or reset the agent swarm
    Swarm {
        #[command(subcommand)]
        command: SwarmCommands,
    },
    /// Show this user's conversation log
    ChatHistory,
    /// Restart the server-side conversation
    ResetSession,
    /// Print version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum SwarmCommands {
    /// Show swarm status
    Status,
    /// Reset one conversation thread
    Reset { thread_id: String },
}
