//! Attribute definitions.
//!
//! An attribute must exist for a resource type before objects of that type
//! can carry it.

use crate::commands::resource::{FieldSpec, ResourceCommand};

pub const NAME: &str = "attributes";
pub const ABOUT: &str = "Attribute objects.";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "The name of the attribute.")
        .short('n')
        .required(),
    FieldSpec::text("resource_name", "The resource type this attribute applies to.")
        .short('r')
        .long("resource-name")
        .required(),
    FieldSpec::text("description", "A helpful description of the attribute.").short('d'),
    FieldSpec::flag("required", "Whether this attribute must be set on every object."),
    FieldSpec::flag("multi", "Whether the attribute takes a list of values."),
    FieldSpec::flag("display", "Whether the attribute is shown by default in the UI."),
];

pub fn command() -> ResourceCommand {
    ResourceCommand::new(NAME, ABOUT, FIELDS)
        .display_fields(&["id", "resource_name", "name", "description", "required", "multi", "display"])
        .headers(&[
            ("resource_name", "Resource"),
            ("required", "Required?"),
            ("multi", "Multi?"),
            ("display", "Display?"),
        ])
}
