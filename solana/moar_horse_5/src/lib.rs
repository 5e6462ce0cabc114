use std::io;
use std::path::PathBuf;

use ctf_pwn::io::PipeError;

pub mod accounts;
pub mod config;
pub mod payload;
pub mod session;

pub use accounts::Accounts;
pub use config::Config;
pub use session::{Session, Summary};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to connect to {addr}: {reason}")]
    Connect { addr: String, reason: String },

    #[error("{stage}: {source}")]
    Pipe {
        stage: &'static str,
        #[source]
        source: PipeError,
    },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid {field} address {text:?}: {reason}")]
    Decode {
        field: &'static str,
        text: String,
        reason: String,
    },

    #[error("cannot read solver payload {}: {source}", .path.display())]
    PayloadMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("solver build failed: {0}")]
    Build(String),
}
