use anchor_lang::prelude::*;

/// Relay instance state, stored as a PDA.
/// Seeds: ["relayer_config", owner]
///
/// The PDA doubles as the SPL delegate that wallets approve for reimbursement
/// and as the authority of any token account used for fund recovery.
#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct Config {
    /// Account that created the instance. Never reassigned.
    pub owner: Pubkey,
    /// Bump seed for PDA
    pub bump: u8,
    /// Set while a forwarded call is in flight
    pub locked: bool,
    pub state: RelayState,
}

#[derive(Debug, Clone, PartialEq, Eq, InitSpace, AnchorSerialize, AnchorDeserialize)]
pub enum RelayState {
    Uninitialized,
    Active { settings: RelaySettings },
}

#[derive(Debug, Clone, PartialEq, Eq, InitSpace, AnchorSerialize, AnchorDeserialize)]
pub struct RelaySettings {
    /// Mint of the reimbursement token (pegged 1:1 to lamports)
    pub token: Pubkey,
    /// Ceiling on the compute-unit price, in micro-lamports
    pub max_priority_fee: u64,
    /// Flat fee added to every reimbursement, in token base units
    pub relayer_fee: u64,
    /// Selector prepended to every forwarded payload
    pub method: [u8; 4],
}

impl Config {
    pub fn new(owner: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            bump,
            locked: false,
            state: RelayState::Uninitialized,
        }
    }

    /// Moves the instance from `Uninitialized` to `Active`. Validation runs
    /// before anything is written, so a rejected call leaves the state as it was.
    pub fn initialize(&mut self, settings: RelaySettings) -> Result<()> {
        require!(!self.initialized(), ConfigError::AlreadyInitialized);
        require_keys_neq!(
            settings.token,
            Pubkey::default(),
            ConfigError::InvalidToken
        );
        require!(settings.max_priority_fee > 0, ConfigError::InvalidFee);

        self.state = RelayState::Active { settings };
        Ok(())
    }

    pub fn settings(&self) -> Result<&RelaySettings> {
        match &self.state {
            RelayState::Active { settings } => Ok(settings),
            RelayState::Uninitialized => err!(ConfigError::NotInitialized),
        }
    }

    pub fn initialized(&self) -> bool {
        matches!(self.state, RelayState::Active { .. })
    }

    pub fn owner(&self) -> Pubkey {
        self.owner
    }

    pub fn token(&self) -> Pubkey {
        self.settings().map(|s| s.token).unwrap_or_default()
    }

    pub fn max_priority_fee(&self) -> u64 {
        self.settings().map(|s| s.max_priority_fee).unwrap_or_default()
    }

    pub fn relayer_fee(&self) -> u64 {
        self.settings().map(|s| s.relayer_fee).unwrap_or_default()
    }

    pub fn method(&self) -> [u8; 4] {
        self.settings().map(|s| s.method).unwrap_or_default()
    }

    pub fn signer_seeds(&self) -> [&[u8]; 3] {
        [
            crate::constants::CONFIG_SEED,
            self.owner.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }
}

#[error_code]
pub enum ConfigError {
    #[msg("Setup was already called")]
    AlreadyInitialized,
    #[msg("Token cannot be empty")]
    InvalidToken,
    #[msg("MaxPriorityFee must be higher than 0")]
    InvalidFee,
    #[msg("Relayer has not been set up")]
    NotInitialized,
}
