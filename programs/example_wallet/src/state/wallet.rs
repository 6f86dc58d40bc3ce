use anchor_lang::prelude::*;

/// Nonce-protected wallet. Holds lamports directly on the PDA.
/// Seeds: ["wallet", owner]
#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct Wallet {
    pub owner: Pubkey,
    /// Incremented on every executed transfer
    pub nonce: u64,
    /// Transfer the owner has approved for the current nonce
    pub pending: Option<PendingTransfer>,
    pub bump: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, InitSpace, AnchorSerialize, AnchorDeserialize)]
pub struct PendingTransfer {
    pub to: Pubkey,
    pub lamports: u64,
    pub nonce: u64,
}

impl Wallet {
    pub const SEED: &'static [u8] = b"wallet";

    pub fn is_authorized(&self, to: &Pubkey, lamports: u64, nonce: u64) -> bool {
        nonce == self.nonce
            && self.pending
                == Some(PendingTransfer {
                    to: *to,
                    lamports,
                    nonce,
                })
    }
}
