mod args;
mod command;
mod survey_cmd;

pub use args::Cli;
pub use command::Command;
pub use survey_cmd::SurveyCmd;

pub use args::parse;
