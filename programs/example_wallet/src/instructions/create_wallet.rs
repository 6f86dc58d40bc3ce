use anchor_lang::prelude::*;

use crate::state::Wallet;

#[derive(Accounts)]
pub struct CreateWallet<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        seeds = [Wallet::SEED, owner.key().as_ref()],
        bump,
        space = 8 + Wallet::INIT_SPACE
    )]
    pub wallet: Account<'info, Wallet>,

    pub system_program: Program<'info, System>,
}

pub fn create_wallet_handler(ctx: Context<CreateWallet>) -> Result<()> {
    *ctx.accounts.wallet = Wallet {
        owner: ctx.accounts.owner.key(),
        nonce: 0,
        pending: None,
        bump: ctx.bumps.wallet,
    };
    Ok(())
}
