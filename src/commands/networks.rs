//! Network objects.
//!
//! A network is an IPv4 or IPv6 prefix. Host addresses are networks too.

use crate::commands::resource::{FieldSpec, ResourceCommand};

pub const NAME: &str = "networks";
pub const ABOUT: &str = "Network objects.";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("cidr", "A network or IP address in CIDR notation.")
        .short('c')
        .required(),
    FieldSpec::text("state", "The allocation state of the network."),
    FieldSpec::attributes(),
];

pub fn command() -> ResourceCommand {
    ResourceCommand::new(NAME, ABOUT, FIELDS)
        .display_fields(&[
            "id",
            "network_address",
            "prefix_length",
            "parent_id",
            "state",
            "attributes",
        ])
        .headers(&[
            ("cidr", "CIDR"),
            ("network_address", "Network"),
            ("prefix_length", "Prefix"),
            ("parent_id", "Parent"),
            ("is_ip", "Is IP?"),
            ("ip_version", "IP Ver."),
            ("state", "State"),
            ("attributes", "Attributes"),
        ])
}
