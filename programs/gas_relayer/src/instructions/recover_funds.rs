use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::{constants::CONFIG_SEED, state::Config};

#[derive(Accounts)]
pub struct RecoverFunds<'info> {
    /// Only the instance owner may sweep funds.
    #[account(address = config.owner @ RecoverFundsError::NotOwner)]
    pub owner: Signer<'info>,

    /// The relay instance. Recovery works whether or not it was initialized.
    #[account(seeds = [CONFIG_SEED, config.owner.as_ref()], bump = config.bump)]
    pub config: Account<'info, Config>,

    /// Mint of the token being recovered; any mint, not only the configured one.
    pub mint: InterfaceAccount<'info, Mint>,

    /// Token account held by the config PDA. Its whole balance is swept.
    #[account(
        mut,
        token::mint = mint,
        token::authority = config,
        token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Token account receiving the recovered balance.
    #[account(
        mut,
        token::mint = mint,
        token::token_program = token_program,
    )]
    pub destination: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn recover_funds_handler(ctx: Context<RecoverFunds>) -> Result<()> {
    let amount = ctx.accounts.vault.amount;

    if amount > 0 {
        let seeds = ctx.accounts.config.signer_seeds();
        let signer_seeds = &[&seeds[..]];
        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                mint: ctx.accounts.mint.to_account_info(),
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
            },
            signer_seeds,
        );
        transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;
    }

    emit!(FundsRecovered {
        config: ctx.accounts.config.key(),
        mint: ctx.accounts.mint.key(),
        destination: ctx.accounts.destination.key(),
        amount,
    });

    Ok(())
}

#[event]
pub struct FundsRecovered {
    pub config: Pubkey,
    pub mint: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}

#[error_code(offset = 6400)]
pub enum RecoverFundsError {
    #[msg("Caller is not the owner")]
    NotOwner,
}
