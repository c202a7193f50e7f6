use super::GlobalOptions;
use crate::core::{
    command_init::CommandInit,
    config::PushyConfig,
    error::{PushyError, Result},
    process::ProcessRunner,
    repo::discover_root,
};
use colored::*;

/// Report whether git can be run and whether the site is a git working tree
pub fn execute_check(options: &GlobalOptions) -> Result<()> {
    let config = PushyConfig::load(options.config.as_deref())?;
    let start = CommandInit::start_dir(options.repo.as_deref())?;

    let version = ProcessRunner::from_config(&config, &start).git_version();
    match &version {
        Some(version) => println!("{} git {version}", "✓".green()),
        None => println!("{} git not found ({})", "✕".red(), config.git.bin),
    }

    let root = discover_root(&start);
    match &root {
        Ok(root) => println!("{} repository {}", "✓".green(), root.display()),
        Err(e) => println!("{} repository: {e}", "✕".red()),
    }

    match (version, root) {
        (None, _) => Err(PushyError::process_spawn(
            config.git.bin,
            std::io::Error::new(std::io::ErrorKind::NotFound, "git is not installed"),
        )),
        (_, Err(e)) => Err(e),
        _ => Ok(()),
    }
}
