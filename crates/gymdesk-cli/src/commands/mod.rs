mod members;
pub use members::*;

mod payments;
pub use payments::*;

mod dashboard;
pub use dashboard::*;

use anyhow::Result;
use inquire::Confirm;

/// Ask for confirmation unless `yes` was given on the command line.
pub fn confirm(message: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let ok = Confirm::new(message).with_default(true).prompt()?;
    Ok(ok)
}
