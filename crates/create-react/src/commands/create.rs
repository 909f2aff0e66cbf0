//! `create-react <project-name>` handler

use anyhow::{Context, Result};
use create_react_core::{
    CommandInstaller, ConfigLoader, PackageInstaller, ProjectName, Scaffolder,
};
use tracing::debug;

use crate::output;

/// Scaffold the project, install its dependencies, and print next steps
pub fn run(name: ProjectName) -> Result<()> {
    let loader = ConfigLoader::new();
    let config = loader.load().with_context(|| match loader.config_file() {
        Some(path) => format!("Failed to load configuration from {}", path),
        None => "Failed to load configuration".to_string(),
    })?;
    debug!("Effective config: {:?}", config);

    let scaffolder = Scaffolder::in_current_dir(config.template_source())?;

    // Checked before the spinner starts so the error is the only output
    scaffolder.check_target(&name)?;

    let spinner = output::spinner(&format!("Creating {}...", name));
    let report = scaffolder.scaffold(&name);
    spinner.finish_and_clear();
    let report = report?;
    debug!(
        "Copied {} files into {} (ignore file renamed: {})",
        report.files_copied, report.project_dir, report.ignore_file_renamed
    );

    let installer = CommandInstaller::from_config(&config);
    output::info("Installing packages. This might take a couple of minutes.");
    installer.install(&report.project_dir)?;

    println!();
    output::success(&format!("React project \"{}\" created successfully!", name));
    println!("To start your project, run:");
    output::command(&format!("cd {}", name));
    output::command(&config.start_command());

    Ok(())
}
