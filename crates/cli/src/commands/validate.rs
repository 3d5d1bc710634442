//! Form validation command.
//!
//! # Usage
//!
//! ```bash
//! cd-cli validate --form form.yaml
//! ```
//!
//! Prints the field errors as JSON (`{}` when there are none) and fails when
//! any are present.

use std::io;
use std::path::Path;

use cart_discounts_core::{FormState, ValidationErrors, validate};
use tracing::{info, warn};

use super::write_json;
use crate::error::CommandError;
use crate::input;

/// Validate the form in `form_path`.
///
/// # Errors
///
/// Returns `CommandError::Invalid` if the form has field errors, or an input
/// error if the file cannot be read.
pub async fn run(form_path: &Path) -> Result<(), CommandError> {
    let form: FormState = input::load(form_path).await?;
    let errors = check(&form, &mut io::stdout().lock())?;

    if errors.is_empty() {
        info!(path = %form_path.display(), "Form is valid");
        Ok(())
    } else {
        warn!(path = %form_path.display(), %errors, "Form is invalid");
        Err(CommandError::Invalid(errors))
    }
}

fn check(form: &FormState, out: &mut impl io::Write) -> Result<ValidationErrors, CommandError> {
    let errors = validate(form);
    write_json(out, &errors)?;
    Ok(errors)
}
