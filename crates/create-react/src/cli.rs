//! CLI argument parsing with clap

use clap::Parser;
use create_react_core::ProjectName;

/// create-react - scaffold a React project and install its dependencies
#[derive(Parser, Debug)]
#[command(name = "create-react")]
#[command(about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Name of the project
    #[arg(
        value_name = "project-name",
        required_unless_present = "version",
        value_parser = parse_project_name
    )]
    pub project_name: Option<ProjectName>,
}

fn parse_project_name(raw: &str) -> Result<ProjectName, String> {
    ProjectName::parse(raw).map_err(|e| e.to_string())
}
