pub mod commands;
pub mod config;
pub mod contracts;
pub mod error;
pub mod ledger;
pub mod pipeline;
pub mod present;
pub mod refresh;
pub mod source;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult, RENDER_FAILURE_PLACEHOLDER};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
