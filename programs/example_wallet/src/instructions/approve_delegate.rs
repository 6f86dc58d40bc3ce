use anchor_lang::prelude::*;
use anchor_spl::token_interface::{approve, Approve, TokenAccount, TokenInterface};

use crate::{errors::WalletError, state::Wallet};

#[derive(Accounts)]
pub struct ApproveDelegate<'info> {
    pub owner: Signer<'info>,

    #[account(
        has_one = owner @ WalletError::Unauthorized,
        seeds = [Wallet::SEED, owner.key().as_ref()],
        bump = wallet.bump
    )]
    pub wallet: Account<'info, Wallet>,

    #[account(
        mut,
        token::authority = wallet,
        token::token_program = token_program,
    )]
    pub wallet_token_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Any account may be granted an allowance
    pub delegate: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Grants `delegate` an allowance of `amount` over the wallet's token account.
pub fn approve_delegate_handler(ctx: Context<ApproveDelegate>, amount: u64) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let seeds = &[Wallet::SEED, owner.as_ref(), &[ctx.accounts.wallet.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        Approve {
            to: ctx.accounts.wallet_token_account.to_account_info(),
            delegate: ctx.accounts.delegate.to_account_info(),
            authority: ctx.accounts.wallet.to_account_info(),
        },
        signer_seeds,
    );
    approve(cpi_ctx, amount)
}
