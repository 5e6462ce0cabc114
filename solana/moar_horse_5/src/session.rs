//! One run against the challenge server: upload the solver, learn the
//! program and user addresses, send the account list, then relay the flag.

use ctf_pwn::io::*;
use solana_program::system_program;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::accounts::{self, Accounts, SOLVE_PROGRAM_ID};
use crate::config::Config;
use crate::SessionError;

pub const PROGRAM_PUBKEY_PROMPT: &str = "program pubkey: ";
pub const PROGRAM_LEN_PROMPT: &str = "program len: ";
pub const PROGRAM_MARKER: &str = "program: ";
pub const USER_MARKER: &str = "user: ";
pub const FLAG_MARKER: &str = "Flag: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub accounts: Accounts,
    pub streamed: u64,
}

pub struct Session {
    pipe: TcpPipe,
}

impl Session {
    pub async fn connect(config: &Config) -> Result<Self, SessionError> {
        let addr = config.addr();
        let pipe = TcpPipe::connect(addr.as_str())
            .await
            .map_err(|e| SessionError::Connect {
                reason: e.to_string(),
                addr,
            })?;
        tracing::info!(addr = %config.addr(), "connected");
        Ok(Self::new(pipe))
    }

    pub fn new(pipe: TcpPipe) -> Self {
        Self { pipe }
    }

    /// Drives the whole conversation. The address lines and everything from
    /// the flag marker on are written to `out`; returns once the server
    /// closes the connection.
    pub async fn run<W>(mut self, solve: &[u8], out: &mut W) -> Result<Summary, SessionError>
    where
        W: AsyncWrite + Unpin,
    {
        let program_line = self.upload(solve).await?;
        let program = accounts::parse_address("program", &program_line)?;

        self.pipe
            .recv_until_utf8(USER_MARKER, false)
            .await
            .map_err(|source| SessionError::Pipe {
                stage: "user",
                source,
            })?;
        let user_line = self
            .pipe
            .recv_until_utf8("\n", false)
            .await
            .map_err(|source| SessionError::Pipe {
                stage: "user",
                source,
            })?;
        let user = accounts::parse_address("user", &user_line)?;

        let accounts = Accounts::derive(program, user);
        let report = format!(
            "PROGRAM= {}\nUSER= {}\nHORSE= {} (bump {})\nWALLET= {} (bump {})\nSYSTEM= {}\n",
            accounts.program,
            accounts.user,
            accounts.horse.address,
            accounts.horse.bump,
            accounts.wallet.address,
            accounts.wallet.bump,
            system_program::ID,
        );
        out.write_all(report.as_bytes()).await?;
        out.flush().await?;

        let instruction = accounts.encode();
        tracing::debug!(%instruction, "sending solver instruction");
        let payload = Payload::builder()
            .push(instruction.as_str())
            .send()
            .recv_until_utf8(FLAG_MARKER, false)
            .build();
        let leak = self
            .pipe
            .payload(payload)
            .await
            .map_err(|source| SessionError::Pipe {
                stage: "flag",
                source,
            })?;
        tracing::info!(bytes = leak.len(), "flag marker reached");
        out.write_all(leak.as_bytes()).await?;
        out.flush().await?;

        let streamed = self.relay(out).await?;
        tracing::info!(bytes = streamed, "server closed the connection");

        Ok(Summary { accounts, streamed })
    }

    /// Hands the solver over and returns the line that follows `program: `.
    async fn upload(&mut self, solve: &[u8]) -> Result<String, SessionError> {
        let len = solve.len().to_string();
        let payload = Payload::builder()
            .recv_until(PROGRAM_PUBKEY_PROMPT, false)
            .push_line(SOLVE_PROGRAM_ID)
            .send()
            .recv_until(PROGRAM_LEN_PROMPT, false)
            .push_line(len.as_str())
            .send()
            .push(solve)
            .send()
            .recv_until(PROGRAM_MARKER, false)
            .recv_line_utf8()
            .build();

        let program_line = self
            .pipe
            .payload(payload)
            .await
            .map_err(|source| SessionError::Pipe {
                stage: "upload",
                source,
            })?;
        tracing::info!(len = solve.len(), "solver uploaded");
        Ok(program_line)
    }

    /// Copies the rest of the output line by line until the server hangs up.
    /// A trailing fragment without a newline is not relayed.
    async fn relay<W>(&mut self, out: &mut W) -> Result<u64, SessionError>
    where
        W: AsyncWrite + Unpin,
    {
        let mut streamed = 0u64;
        loop {
            match self.pipe.recv_until_utf8("\n", false).await {
                Ok(line) => {
                    out.write_all(line.as_bytes()).await?;
                    out.flush().await?;
                    streamed += line.len() as u64;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "stream ended");
                    return Ok(streamed);
                }
            }
        }
    }
}
