use std::{net::SocketAddr, path::PathBuf};

use crate::cli::Cli;

const DEFAULT_DATABASE_FILE: &str = "surveys.sqlite";

/// Resolved runtime configuration.
#[derive(Clone, Debug)]
pub struct Context {
    pub data_dir: PathBuf,
    pub database: PathBuf,
    pub container: String,
    pub reset: bool,
    pub log_file: Option<PathBuf>,
    pub api_listen: SocketAddr,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        let data_dir = PathBuf::from(&cli.data_dir);
        let database = cli
            .database
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DEFAULT_DATABASE_FILE));

        Self {
            data_dir,
            database,
            container: cli.container.clone(),
            reset: cli.reset,
            log_file: cli.log_file.as_ref().map(PathBuf::from),
            api_listen: cli.api_listen,
        }
    }
}
