use anchor_lang::prelude::*;

use crate::{
    constants::CONFIG_SEED,
    state::{Config, RelaySettings},
};

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The relay instance to configure.
    /// - PDA seeded by its owner
    /// - Mutable to store the settings and flip it to `Active`
    #[account(mut, seeds = [CONFIG_SEED, config.owner.as_ref()], bump = config.bump)]
    pub config: Account<'info, Config>,
}

pub fn initialize_handler(ctx: Context<Initialize>, settings: RelaySettings) -> Result<()> {
    ctx.accounts.config.initialize(settings.clone())?;

    emit!(RelayerInitialized {
        config: ctx.accounts.config.key(),
        token: settings.token,
        max_priority_fee: settings.max_priority_fee,
        relayer_fee: settings.relayer_fee,
        method: settings.method,
    });

    Ok(())
}

#[event]
pub struct RelayerInitialized {
    pub config: Pubkey,
    pub token: Pubkey,
    pub max_priority_fee: u64,
    pub relayer_fee: u64,
    pub method: [u8; 4],
}
