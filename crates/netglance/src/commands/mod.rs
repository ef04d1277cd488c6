//! Command handlers.

pub mod status;
pub mod watch;

use netglance_core::Connectivity;

/// Human label for the active interface set.
pub(crate) fn interfaces_label(conn: &Connectivity) -> String {
    let signature = conn.interface_signature();
    if signature.is_empty() {
        "none".to_owned()
    } else {
        signature
    }
}
