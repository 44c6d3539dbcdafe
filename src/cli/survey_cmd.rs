use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum SurveyCmd {
    #[command(
        about = "List stored survey names",
        long_about = "Print the names of every survey in the configured container as a JSON object."
    )]
    List,
    #[command(
        about = "Print one survey",
        long_about = "Print the stored content of a survey as JSON. Fails when no survey has that name."
    )]
    Get {
        #[arg(long, value_name = "NAME", help = "Survey name (case-sensitive)")]
        name: String,
    },
    #[command(
        about = "Create or replace a survey",
        long_about = "Store a JSON document under NAME, fully replacing any previous content."
    )]
    Put {
        #[arg(long, value_name = "NAME", help = "Survey name (case-sensitive)")]
        name: String,
        #[arg(
            long,
            value_name = "PATH",
            conflicts_with = "json",
            required_unless_present = "json",
            help = "Read the survey content from a JSON file"
        )]
        file: Option<PathBuf>,
        #[arg(long, value_name = "JSON", help = "Survey content given inline")]
        json: Option<String>,
    },
}
