//! UI bridge: string messages from the embedded UI mapped onto registry operations.
//!
//! # Invariants
//! - Every command means "exactly this set of parts is highlighted".
//! - Parsing never fails; unknown names surface as registry warnings.
//! - A connector with no registry bound ignores every message.

pub mod command;
pub mod connector;

pub use command::Command;
pub use connector::{Delivery, UiConnector};

pub fn crate_info() -> &'static str {
    "partlight-bridge v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("bridge"));
    }
}
