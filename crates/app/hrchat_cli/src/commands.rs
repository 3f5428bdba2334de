//! Command handlers.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use hrchat_core::models::auth::Credentials;
use hrchat_core::models::chat::ChatResponse;
use hrchat_core::session::{AuthLevel, FileCookieStore, format_user_name};
use hrchat_core::{ApiClient, ApiError, ClientConfig, Session};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::cli::{Cli, Commands, SwarmCommands};
use crate::navigation::TerminalNavigator;
use crate::{Error, Result};

const EMPLOYEE_SUGGESTIONS: &[&str] = &[
    "How many vacation days do I have left?",
    "Show my leave history",
    "Who is my manager?",
    "What is the remote work policy?",
];

const HR_SUGGESTIONS: &[&str] = &[
    "Show the team's pending leave requests",
    "Give me a department headcount summary",
];

/// Wire config, session file and navigator from the command line.
///
/// `login` gets no navigator: a rejected password is reported inline rather
/// than as an ended session.
pub fn build_client(args: &Cli) -> ApiClient {
    let conn = &args.connection;
    let mut config = ClientConfig::from_env();
    if let Some(url) = &conn.api_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = conn.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(retries) = conn.retries {
        config.retry_attempts = retries;
    }

    let path = conn
        .session_file
        .clone()
        .unwrap_or_else(FileCookieStore::default_path);
    debug!(base_url = %config.base_url, session_file = %path.display(), "client configured");

    let session = Session::new(Arc::new(FileCookieStore::new(path, config.is_secure())));
    let session = match args.command {
        Commands::Login { .. } => session,
        _ => session.with_navigator(Arc::new(TerminalNavigator)),
    };
    ApiClient::new(config, session)
}

pub async fn run(client: &ApiClient, command: Commands) -> Result<()> {
    match command {
        Commands::Login {
            employee_id,
            password,
        } => login(client, employee_id, password).await,
        Commands::Logout => {
            client.logout();
            println!("Logged out.");
            Ok(())
        }
        Commands::Whoami => whoami(client),
        Commands::Chat { message } => {
            require_auth(client)?;
            match message {
                Some(message) => send(client, &message).await,
                None => repl(client).await,
            }
        }
        Commands::Health => {
            let health = client.health_check().await?.data;
            print_json(&serde_json::to_value(&health)?)?;
            if !health.is_healthy() {
                return Err(Error::Custom(format!("backend reports {}", health.status)));
            }
            Ok(())
        }
        Commands::Ping => {
            if client.test_connection().await {
                println!("{} is reachable", client.config().base_url);
                Ok(())
            } else {
                Err(Error::Custom(format!(
                    "{} is unreachable",
                    client.config().base_url
                )))
            }
        }
        Commands::Balance { employee_id } => {
            require_auth(client)?;
            let id = employee_or_self(client, employee_id)?;
            print_json(&client.get_balance(&id).await?.data)
        }
        Commands::History { employee_id } => {
            require_auth(client)?;
            let id = employee_or_self(client, employee_id)?;
            print_json(&client.get_history(&id).await?.data)
        }
        Commands::Status => print_json(&client.get_system_status().await?.data),
        Commands::Swarm { command } => match command {
            SwarmCommands::Status => print_json(&client.get_swarm_status().await?.data),
            SwarmCommands::Reset { thread_id } => {
                require_auth(client)?;
                print_json(&client.reset_swarm_conversation(&thread_id).await?.data)
            }
        },
        Commands::ChatHistory => {
            require_auth(client)?;
            print_json(&client.get_chat_history().await?.data)
        }
        Commands::ResetSession => {
            require_auth(client)?;
            print_json(&client.reset_user_session().await?.data)
        }
        Commands::Version => {
            println!("hrchat {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn require_auth(client: &ApiClient) -> Result<()> {
    if client.session().require_auth() {
        Ok(())
    } else {
        Err(Error::NotLoggedIn)
    }
}

fn employee_or_self(client: &ApiClient, employee_id: Option<String>) -> Result<String> {
    employee_id
        .or_else(|| {
            client
                .session()
                .get_user_info()
                .map(|user| user.user_id)
                .filter(|id| !id.is_empty())
        })
        .ok_or_else(|| Error::Custom("no employee ID given and none in the session".into()))
}

async fn login(client: &ApiClient, employee_id: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ").await?,
    };

    let resp = client
        .login(&Credentials::new(employee_id, password))
        .await?
        .data;
    if !client.session().is_authenticated() {
        let message = resp
            .message
            .unwrap_or_else(|| "Login failed. Please check your credentials.".into());
        return Err(Error::Custom(message));
    }

    let session = client.session();
    let user = session.get_user_info();
    let name = format_user_name(user.as_ref());
    let role = user.map(|u| u.role).unwrap_or_default();
    println!("Welcome, {} [{}]", name.display, role);
    Ok(())
}

fn whoami(client: &ApiClient) -> Result<()> {
    let session = client.session();
    let user = session.get_user_info().ok_or(Error::NotLoggedIn)?;
    let name = format_user_name(Some(&user));

    println!("{} ({})", name.display, name.initials);
    println!("role:       {}", user.role);
    println!("department: {}", user.department);
    println!("access:     {}", session.get_auth_level());
    match session.token_expires_at() {
        Some(at) => {
            let state = if session.is_token_expired() {
                "expired"
            } else {
                "valid"
            };
            println!(
                "session:    {state} until {}",
                at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S %Z")
            );
        }
        None => println!("session:    no expiry"),
    }
    Ok(())
}

async fn send(client: &ApiClient, message: &str) -> Result<()> {
    let resp = client.send_message(message).await?;
    print_reply(&resp.data);
    Ok(())
}

/// Line-oriented chat. Send failures are shown inline and the loop goes on;
/// a 401 ends it.
async fn repl(client: &ApiClient) -> Result<()> {
    let session = client.session();
    let name = format_user_name(session.get_user_info().as_ref());
    println!("Hi {}! Ask me anything about HR. /help lists commands.", name.full);
    print_suggestions(session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt_marker("> ").await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/help" => {
                println!("/history  show this conversation's log");
                println!("/reset    start a new conversation");
                println!("/quit     leave");
                print_suggestions(session);
            }
            "/history" => report(client.get_chat_history().await.map(|r| r.data))?,
            "/reset" => report(client.reset_user_session().await.map(|r| r.data))?,
            message => match client.send_message(message).await {
                Ok(resp) => print_reply(&resp.data),
                Err(e) if e.is_unauthorized() => return Err(e.into()),
                Err(e) => eprintln!("error: {e}"),
            },
        }
    }
    Ok(())
}

/// Print a side-command result; only a 401 is fatal.
fn report(result: std::result::Result<Value, ApiError>) -> Result<()> {
    match result {
        Ok(data) => print_json(&data),
        Err(e) if e.is_unauthorized() => Err(e.into()),
        Err(e) => {
            eprintln!("error: {e}");
            Ok(())
        }
    }
}

fn print_suggestions(session: &Session) {
    let mut suggestions = EMPLOYEE_SUGGESTIONS.to_vec();
    if session.has_permission(AuthLevel::Hr) {
        suggestions.extend_from_slice(HR_SUGGESTIONS);
    }
    println!("Try:");
    for suggestion in suggestions {
        println!("  - {suggestion}");
    }
}

fn print_reply(reply: &ChatResponse) {
    match reply.system_mode.as_deref() {
        Some(mode) => println!("assistant [{mode}]: {}", reply.response),
        None => println!("assistant: {}", reply.response),
    }
}

fn print_json(value: &Value) -> Result<()> {
    match value {
        Value::String(text) => println!("{text}"),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

async fn prompt_marker(marker: &str) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(marker.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

/// Read one line from stdin after writing `label` to stderr.
async fn prompt(label: &str) -> Result<String> {
    let mut stderr = tokio::io::stderr();
    stderr.write_all(label.as_bytes()).await?;
    stderr.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
