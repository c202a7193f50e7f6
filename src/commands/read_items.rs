use super::GlobalOptions;
use crate::core::error::Result;

/// Print the pending changes as the ordered path to item JSON map
pub fn execute_read_items(options: &GlobalOptions) -> Result<()> {
    let context = options.init()?;
    let registry = context
        .repo
        .changed_items(&context.classifier, &context.lookup)?;
    log::debug!("Listing {} changed item(s)", registry.len());

    println!("{}", serde_json::to_string(&registry)?);
    Ok(())
}
