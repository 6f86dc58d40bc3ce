use anchor_lang::prelude::*;

use crate::{constants::CONFIG_SEED, state::Config};

#[derive(Accounts)]
pub struct Create<'info> {
    /// The account creating the relay instance. Becomes its permanent owner
    /// and pays for the config account rent.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// The relay instance state account.
    /// - PDA seeded by the owner, so every owner gets exactly one instance
    /// - Starts `Uninitialized`; settings are written by `initialize`
    #[account(
        init,
        payer = owner,
        seeds = [CONFIG_SEED, owner.key().as_ref()],
        bump,
        space = 8 + Config::INIT_SPACE
    )]
    pub config: Account<'info, Config>,

    /// System program required for creating new accounts.
    pub system_program: Program<'info, System>,
}

pub fn create_handler(ctx: Context<Create>) -> Result<()> {
    *ctx.accounts.config = Config::new(ctx.accounts.owner.key(), ctx.bumps.config);

    emit!(RelayerCreated {
        config: ctx.accounts.config.key(),
        owner: ctx.accounts.owner.key(),
    });

    Ok(())
}

#[event]
pub struct RelayerCreated {
    pub config: Pubkey,
    pub owner: Pubkey,
}
