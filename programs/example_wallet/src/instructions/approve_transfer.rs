use anchor_lang::prelude::*;

use crate::{
    errors::WalletError,
    state::{PendingTransfer, Wallet},
};

#[derive(Accounts)]
pub struct ApproveTransfer<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        has_one = owner @ WalletError::Unauthorized,
        seeds = [Wallet::SEED, owner.key().as_ref()],
        bump = wallet.bump
    )]
    pub wallet: Account<'info, Wallet>,
}

/// Approves a single transfer at the current nonce. Anyone may execute it
/// afterwards; replacing the approval before execution is allowed.
pub fn approve_transfer_handler(
    ctx: Context<ApproveTransfer>,
    to: Pubkey,
    lamports: u64,
) -> Result<()> {
    let wallet = &mut ctx.accounts.wallet;
    wallet.pending = Some(PendingTransfer {
        to,
        lamports,
        nonce: wallet.nonce,
    });
    Ok(())
}
