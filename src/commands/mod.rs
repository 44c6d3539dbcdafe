use crate::cli::Command;
use crate::storage::Storage;

pub mod survey;

pub trait CommandRunner {
    fn run<S: Storage>(&self, storage: &S) -> anyhow::Result<()>;
}

impl Command {
    pub fn run<S: Storage>(&self, storage: &S) -> anyhow::Result<()> {
        match self {
            Command::Survey { cmd } => cmd.run(storage),
        }
    }
}
