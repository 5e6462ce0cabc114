//! Addresses the solver instruction is built from, and the text form the
//! server reads it in: an account count, one `<flags> <pubkey>` line per
//! account, then the instruction data length. Flag letters are `w`
//! (writable) and `s` (signer); an account with neither is sent as `x`.

use std::fmt;
use std::str::FromStr;

use solana_program::pubkey::Pubkey;
use solana_program::system_program;

use crate::SessionError;

/// Address the server assigns to the uploaded solver program.
pub const SOLVE_PROGRAM_ID: &str = "5PjDJaGfSPJj4tFzMRCiuuAasKg5n8dJKXKenhuwZexx";

pub const HORSE_SEED: &[u8] = b"HORSE";
pub const WALLET_SEED: &[u8] = b"WALLET";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

/// Decodes a base58 address line as printed by the server.
pub fn parse_address(field: &'static str, line: &str) -> Result<Pubkey, SessionError> {
    let text = line.trim();
    Pubkey::from_str(text).map_err(|e| SessionError::Decode {
        field,
        text: text.to_string(),
        reason: e.to_string(),
    })
}

pub fn horse(program: &Pubkey) -> DerivedAddress {
    derive(&[HORSE_SEED], program)
}

pub fn wallet(program: &Pubkey, user: &Pubkey) -> DerivedAddress {
    derive(&[WALLET_SEED, user.as_ref()], program)
}

fn derive(seeds: &[&[u8]], program: &Pubkey) -> DerivedAddress {
    let (address, bump) = Pubkey::find_program_address(seeds, program);
    DerivedAddress { address, bump }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountLine {
    pub pubkey: Pubkey,
    pub writable: bool,
    pub signer: bool,
}

impl AccountLine {
    pub fn readonly(pubkey: Pubkey) -> Self {
        Self {
            pubkey,
            writable: false,
            signer: false,
        }
    }

    pub fn writable(pubkey: Pubkey) -> Self {
        Self {
            writable: true,
            ..Self::readonly(pubkey)
        }
    }

    pub fn signer(mut self) -> Self {
        self.signer = true;
        self
    }
}

impl fmt::Display for AccountLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.writable, self.signer) {
            (false, false) => write!(f, "x {}", self.pubkey),
            (true, false) => write!(f, "w {}", self.pubkey),
            (false, true) => write!(f, "s {}", self.pubkey),
            (true, true) => write!(f, "ws {}", self.pubkey),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accounts {
    pub program: Pubkey,
    pub user: Pubkey,
    pub horse: DerivedAddress,
    pub wallet: DerivedAddress,
}

impl Accounts {
    pub fn derive(program: Pubkey, user: Pubkey) -> Self {
        Self {
            program,
            user,
            horse: horse(&program),
            wallet: wallet(&program, &user),
        }
    }

    /// Accounts handed to the solver, in the order its processor reads them.
    pub fn lines(&self) -> [AccountLine; 5] {
        [
            AccountLine::readonly(self.program),
            AccountLine::writable(self.user).signer(),
            AccountLine::writable(self.horse.address),
            AccountLine::writable(self.wallet.address),
            AccountLine::readonly(system_program::ID),
        ]
    }

    /// The full instruction block; the solver takes no instruction data.
    pub fn encode(&self) -> String {
        let lines = self.lines();
        let mut out = format!("{}\n", lines.len());
        for line in &lines {
            out.push_str(&format!("{line}\n"));
        }
        out.push_str("0\n");
        out
    }
}
