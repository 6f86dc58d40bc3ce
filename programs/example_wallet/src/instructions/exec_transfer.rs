use anchor_lang::prelude::*;

use crate::{errors::WalletError, state::Wallet};

#[derive(Accounts)]
pub struct ExecTransfer<'info> {
    #[account(mut, seeds = [Wallet::SEED, wallet.owner.as_ref()], bump = wallet.bump)]
    pub wallet: Account<'info, Wallet>,

    /// CHECK: Compared against the approved destination
    #[account(mut)]
    pub recipient: UncheckedAccount<'info>,
}

/// Executes the approved transfer. Returns `false` without moving funds when
/// the call does not match the approval for the current nonce.
pub fn exec_transfer_handler(
    ctx: Context<ExecTransfer>,
    to: Pubkey,
    lamports: u64,
    nonce: u64,
) -> Result<bool> {
    let wallet = &mut ctx.accounts.wallet;

    if ctx.accounts.recipient.key() != to || !wallet.is_authorized(&to, lamports, nonce) {
        msg!("Transfer not authorized for nonce {}", nonce);
        return Ok(false);
    }

    let rent_floor = Rent::get()?.minimum_balance(wallet.to_account_info().data_len());
    require!(
        wallet.get_lamports() >= rent_floor.saturating_add(lamports),
        WalletError::InsufficientFunds
    );

    wallet.sub_lamports(lamports)?;
    ctx.accounts.recipient.add_lamports(lamports)?;

    wallet.nonce += 1;
    wallet.pending = None;

    Ok(true)
}
