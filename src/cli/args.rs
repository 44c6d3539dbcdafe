use clap::Parser;
use std::env;

use crate::cli::command::Command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Serve survey documents over HTTP",
    long_about = "Lists, reads and upserts JSON survey documents keyed by survey name, backed by a SQLite document store.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long,
        env = "SURVEY_STORE_DATA_DIR",
        default_value = ".survey-store/",
        value_name = "DIR",
        help = "Directory to store persistent data"
    )]
    pub data_dir: String,

    #[arg(
        long,
        env = "SURVEY_STORE_DATABASE",
        value_name = "PATH",
        help = "SQLite database file (defaults to surveys.sqlite inside the data dir)"
    )]
    pub database: Option<String>,

    #[arg(
        long,
        env = "SURVEY_STORE_CONTAINER",
        default_value = "surveys",
        value_name = "NAME",
        help = "Container holding the survey documents"
    )]
    pub container: String,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted state (delete the SQLite database) before starting"
    )]
    pub reset: bool,

    #[arg(
        long = "log-file",
        env = "SURVEY_STORE_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long = "api-listen",
        env = "SURVEY_STORE_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:7071",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    match dotenvy::from_filename(&dotenv_path) {
        Ok(_) => log::info!("Loaded env from {}", dotenv_path),
        Err(_) => log::debug!("No env file at {}", dotenv_path),
    }
    Cli::parse()
}
