//! Dispatching admin requests to the publishing core.
//!
//! A request is a task name plus a body. `readItems` lists the pending
//! changes, `publishItems` commits a selection. Every response carries a
//! status code and a JSON body, so the transport in front of the router only
//! moves bytes.

use crate::core::classifier::ChangeClassifier;
use crate::core::content::ContentLookup;
use crate::core::error::PushyError;
use crate::core::identity::IdentityProvider;
use crate::core::process::CommandRunner;
use crate::core::publish::{PublishCoordinator, PublishRequest, PublishResult};
use crate::core::repo::PushyRepo;
use serde::Serialize;
use serde_json::{json, Value};

pub const READ_ITEMS: &str = "readItems";
pub const PUBLISH_ITEMS: &str = "publishItems";

const TASK_PREFIX: &str = "pushy:";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterResponse {
    pub status: u16,
    pub body: Value,
}

impl RouterResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn alert(status: u16, error: &PushyError) -> Self {
        Self {
            status,
            body: json!({ "isSuccess": false, "alert": error.to_string() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Task name without the optional `pushy:` namespace
pub fn parse_task(task: &str) -> &str {
    let task = task.trim();
    task.strip_prefix(TASK_PREFIX).unwrap_or(task)
}

pub struct RequestRouter<'a, R: CommandRunner> {
    repo: &'a PushyRepo<R>,
    classifier: &'a ChangeClassifier,
    lookup: &'a dyn ContentLookup,
    identity: &'a dyn IdentityProvider,
}

impl<'a, R: CommandRunner> RequestRouter<'a, R> {
    pub fn new(
        repo: &'a PushyRepo<R>,
        classifier: &'a ChangeClassifier,
        lookup: &'a dyn ContentLookup,
        identity: &'a dyn IdentityProvider,
    ) -> Self {
        Self {
            repo,
            classifier,
            lookup,
            identity,
        }
    }

    pub fn handle(&self, task: &str, body: &[u8]) -> RouterResponse {
        match parse_task(task) {
            READ_ITEMS => self.read_items(),
            PUBLISH_ITEMS => self.publish_items(body),
            other => {
                log::warn!("Unknown request '{other}'");
                RouterResponse::alert(404, &PushyError::unknown_task(other))
            }
        }
    }

    fn read_items(&self) -> RouterResponse {
        let listing = self
            .repo
            .changed_items(self.classifier, self.lookup)
            .and_then(|registry| registry.to_json());
        match listing {
            Ok(items) => RouterResponse::ok(items),
            Err(e) => {
                log::error!("Listing changed items failed: {e}");
                RouterResponse::alert(500, &e)
            }
        }
    }

    fn publish_items(&self, body: &[u8]) -> RouterResponse {
        let request = match PublishRequest::from_json(body) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("Rejected publish request: {e}");
                return RouterResponse::alert(400, &e);
            }
        };

        let result = match self.identity.current_user() {
            Ok(author) => {
                PublishCoordinator::new(self.repo.runner()).publish(&request, &author)
            }
            Err(e) => {
                log::error!("Cannot attribute publish: {e}");
                PublishResult::failure(format!("There was an error publishing: \"{e}\""))
            }
        };

        match serde_json::to_value(&result) {
            Ok(body) => RouterResponse::ok(body),
            Err(e) => RouterResponse::alert(500, &PushyError::from(e)),
        }
    }
}
