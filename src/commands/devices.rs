//! Device objects.

use crate::commands::resource::{FieldSpec, ResourceCommand};

pub const NAME: &str = "devices";
pub const ABOUT: &str = "Device objects.";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("hostname", "The hostname of the device.")
        .short('H')
        .required(),
    FieldSpec::attributes(),
];

pub fn command() -> ResourceCommand {
    ResourceCommand::new(NAME, ABOUT, FIELDS)
        .display_fields(&["id", "hostname", "attributes"])
        .headers(&[("hostname", "Hostname"), ("attributes", "Attributes")])
}
