//! Shared pieces for the contacts workspace: tracing setup and small response types.

pub mod types;

pub mod utils {
    pub mod logging;
}
