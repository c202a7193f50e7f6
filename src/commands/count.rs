use super::GlobalOptions;
use crate::core::error::Result;

/// Print how many items are waiting to be published
pub fn execute_count(options: &GlobalOptions) -> Result<()> {
    let context = options.init()?;

    let count = if context.repo.has_changes()? {
        context.repo.status_select()?.len()
    } else {
        0
    };
    println!("{count}");
    Ok(())
}
