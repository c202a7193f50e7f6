use super::{read_stdin, GlobalOptions};
use crate::core::{
    command_init::AuthorOverride,
    error::{PushyError, Result},
    publish::{PublishCoordinator, PublishRequest},
};

/// Publish the selection read from stdin and print the result JSON.
///
/// An unsuccessful publish still prints its result before failing.
pub fn execute_publish_items(options: &GlobalOptions, author: &AuthorOverride) -> Result<()> {
    let body = read_stdin()?;
    let request = PublishRequest::from_json(&body)?;

    let context = options.init()?;
    let identity = context.identity(author)?;
    let author = identity.current_user()?;

    let result = PublishCoordinator::new(context.repo.runner()).publish(&request, &author);
    println!("{}", serde_json::to_string(&result)?);

    if result.is_success {
        Ok(())
    } else {
        Err(PushyError::publish(result.alert))
    }
}
