use std::io::Write;

use super::CommandRunner;
use crate::cli;
use crate::rest::validation::parse_content;
use crate::storage::{Storage, SurveyRead, SurveyWrite};
use anyhow::{Context, Result};

impl CommandRunner for cli::SurveyCmd {
    fn run<S: Storage>(&self, storage: &S) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute(storage, &mut out)
    }
}

impl cli::SurveyCmd {
    fn execute<S: Storage, W: Write>(&self, storage: &S, out: &mut W) -> Result<()> {
        let handle = storage.get_client().context("opening survey store")?;
        match self {
            cli::SurveyCmd::List => {
                let names = handle.list_surveys().context("listing surveys")?;
                let body = serde_json::json!({ "surveyNames": names });
                writeln!(out, "{}", body)?;
                Ok(())
            }
            cli::SurveyCmd::Get { name } => {
                let survey = handle
                    .get_survey(name)
                    .with_context(|| format!("loading survey {name:?}"))?
                    .with_context(|| format!("survey {name:?} not found"))?;
                writeln!(out, "{}", survey.content)?;
                Ok(())
            }
            cli::SurveyCmd::Put { name, file, json } => {
                let raw = match (file, json) {
                    (Some(path), _) => std::fs::read(path)
                        .with_context(|| format!("reading {}", path.display()))?,
                    (None, Some(inline)) => inline.clone().into_bytes(),
                    (None, None) => anyhow::bail!("either --file or --json is required"),
                };
                anyhow::ensure!(!name.is_empty(), "survey name must not be empty");
                let content = parse_content(&raw)?;
                handle
                    .put_survey(name, &content)
                    .with_context(|| format!("storing survey {name:?}"))?;
                log::info!("stored survey {:?}", name);
                Ok(())
            }
        }
    }
}
