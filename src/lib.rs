#![doc(test(attr(deny(warnings))))]

//! College Forms provides the multi-step form wizards of a college discovery
//! platform: a student profile, a college predictor, and an admin-only
//! add-college flow that exports CSV, plus a shell to drive them.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod flows;
pub mod session;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("College Forms tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
