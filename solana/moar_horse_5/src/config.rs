use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_PAYLOAD: &str = "target/deploy/moar_horse_solve.so";

/// Solver for the moar-horse-5 Solana challenge.
#[derive(Parser, Debug, Clone)]
#[command(name = "moar_horse_5", version)]
pub struct Config {
    /// Challenge host.
    #[arg(long, env = "MOAR_HORSE_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Challenge port.
    #[arg(long, env = "MOAR_HORSE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Solver artifact, relative to --solve-dir unless absolute.
    #[arg(long, default_value = DEFAULT_PAYLOAD)]
    pub payload: PathBuf,

    /// Solver crate directory; `cargo build-sbf` runs here.
    #[arg(long, default_value = ".")]
    pub solve_dir: PathBuf,

    /// Upload the existing artifact without rebuilding it.
    #[arg(long)]
    pub skip_build: bool,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn payload_path(&self) -> PathBuf {
        self.solve_dir.join(&self.payload)
    }
}
