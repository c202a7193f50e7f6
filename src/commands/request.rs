use super::{read_stdin, GlobalOptions};
use crate::core::{command_init::AuthorOverride, error::Result};

/// Route one raw request, body on stdin, and print `{"status", "body"}`.
///
/// The response status carries the outcome, so a handled request always
/// exits successfully.
pub fn execute_request(options: &GlobalOptions, task: &str) -> Result<()> {
    let body = read_stdin()?;
    let context = options.init()?;
    let identity = context.identity(&AuthorOverride::default())?;

    let response = context.router(identity.as_ref()).handle(task, &body);
    log::debug!("Request '{task}' answered with {}", response.status);

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
