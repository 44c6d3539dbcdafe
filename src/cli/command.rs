use clap::Subcommand;

use crate::cli::survey_cmd::SurveyCmd;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Survey document commands",
        long_about = "List, read or upsert survey documents directly against the configured store without starting the REST server."
    )]
    Survey {
        #[command(subcommand)]
        cmd: SurveyCmd,
    },
}
