//! Site objects.

use crate::commands::resource::{FieldSpec, ResourceCommand};

pub const NAME: &str = "sites";
pub const ABOUT: &str = "Site objects.";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "The name of the site.")
        .short('n')
        .required(),
    FieldSpec::text("description", "A helpful description for the site.").short('d'),
];

// Sites only carry id, name and description, all covered by the default
// field map, so list shows every returned field.
pub fn command() -> ResourceCommand {
    ResourceCommand::new(NAME, ABOUT, FIELDS)
}
