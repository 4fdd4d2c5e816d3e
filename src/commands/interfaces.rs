//! Interface objects.

use crate::commands::resource::{FieldSpec, ResourceCommand};

pub const NAME: &str = "interfaces";
pub const ABOUT: &str = "Network interface objects.";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("device", "Unique ID of the device this interface is bound to.")
        .short('D')
        .required(),
    FieldSpec::text("name", "The name of the interface (e.g. eth0).")
        .short('n')
        .required(),
    FieldSpec::text("description", "A helpful description for the interface.").short('e'),
    FieldSpec::integer("type", "The interface type (IANA ifType number).").short('t'),
    FieldSpec::integer("speed", "Speed of the interface in Mbps.").short('S'),
    FieldSpec::integer("parent_id", "Unique ID of the parent interface.")
        .short('p')
        .long("parent-id"),
    FieldSpec::attributes(),
];

pub fn command() -> ResourceCommand {
    ResourceCommand::new(NAME, ABOUT, FIELDS)
        .display_fields(&["id", "device", "name", "parent_id", "type", "speed", "attributes"])
        .headers(&[
            ("device", "Device"),
            ("parent_id", "Parent"),
            ("type", "Type"),
            ("speed", "Speed"),
            ("attributes", "Attributes"),
        ])
}
