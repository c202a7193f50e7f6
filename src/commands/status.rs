use super::GlobalOptions;
use crate::core::{
    error::Result,
    output::{print_info, print_items, print_section_header},
};

/// Show the pending changes, colored, in the order git reported them
pub fn execute_status(options: &GlobalOptions) -> Result<()> {
    let context = options.init()?;
    let registry = context
        .repo
        .changed_items(&context.classifier, &context.lookup)?;

    if registry.is_empty() {
        print_info("Nothing to publish");
        return Ok(());
    }

    print_section_header(&format!("Pending changes ({})", registry.len()));
    print_items(&registry);
    println!();
    Ok(())
}
