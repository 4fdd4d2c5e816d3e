//! Protocol objects (e.g. a BGP session on a device).

use crate::commands::resource::{FieldSpec, ResourceCommand};

pub const NAME: &str = "protocols";
pub const ABOUT: &str = "Protocol objects.";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("type", "The protocol type (e.g. bgp, ospf).")
        .short('t')
        .required(),
    FieldSpec::integer("device", "Unique ID of the device running the protocol.")
        .short('D')
        .required(),
    FieldSpec::integer("interface", "Unique ID of the interface the protocol runs on.")
        .short('i'),
    FieldSpec::text("circuit", "Name of the circuit the protocol runs over.").short('c'),
    FieldSpec::text("description", "A helpful description for the protocol.").short('e'),
    FieldSpec::attributes(),
];

pub fn command() -> ResourceCommand {
    ResourceCommand::new(NAME, ABOUT, FIELDS)
        .display_fields(&[
            "id",
            "type",
            "device",
            "interface",
            "circuit",
            "description",
            "attributes",
        ])
        .headers(&[
            ("type", "Type"),
            ("device", "Device"),
            ("interface", "Interface"),
            ("circuit", "Circuit"),
            ("attributes", "Attributes"),
        ])
}
