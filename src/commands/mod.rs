pub mod check;
pub mod count;
pub mod publish_items;
pub mod read_items;
pub mod request;
pub mod status;

pub use check::*;
pub use count::*;
pub use publish_items::*;
pub use read_items::*;
pub use request::*;
pub use status::*;

use crate::core::error::Result;
use std::io::Read;
use std::path::PathBuf;

/// Options shared by every repository command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub repo: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    pub fn init(&self) -> Result<crate::core::CommandContext> {
        crate::core::CommandInit::initialize(self.repo.as_deref(), self.config.as_deref())
    }
}

fn read_stdin() -> Result<Vec<u8>> {
    let mut body = Vec::new();
    std::io::stdin().read_to_end(&mut body)?;
    log::debug!("Read {} bytes of request body", body.len());
    Ok(body)
}
