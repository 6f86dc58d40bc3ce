#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

mod constants;
mod instructions;
mod internal;
mod state;

use instructions::*;
pub use state::*;

#[cfg(test)]
mod test_utils;

declare_id!("7VRU3ZxBY6f1VcrP89ezR5J9EFzhR4BcfgMnGqi2UbrL");

#[program]
pub mod gas_relayer {

    use super::*;

    /// Creates a relay instance owned by the signer.
    /// The `Config` PDA is seeded by the owner's key and starts uninitialized.
    /// Ownership is fixed here and never changes afterwards.
    ///
    /// # Arguments
    /// * `ctx` - The context containing the `owner` signer, who pays for the
    ///           account, and the `config` PDA to create.
    pub fn create(ctx: Context<Create>) -> Result<()> {
        create_handler(ctx)
    }

    /// Writes the relay settings exactly once and activates the instance.
    /// Should be sent in the same transaction as `create`.
    ///
    /// # Arguments
    /// * `ctx`              - The context containing the `config` PDA.
    /// * `token`            - Mint used for reimbursement, pegged 1:1 to lamports.
    ///                        Must not be the default pubkey.
    /// * `max_priority_fee` - Highest compute-unit price (micro-lamports) a relay
    ///                        transaction may bid. Must be non-zero.
    /// * `relayer_fee`      - Flat amount added to every reimbursement.
    /// * `method`           - Selector prepended to every forwarded payload.
    ///
    /// # Errors
    /// `AlreadyInitialized`, `InvalidToken` or `InvalidFee`; state is left
    /// untouched on failure.
    pub fn initialize(
        ctx: Context<Initialize>,
        token: Pubkey,
        max_priority_fee: u64,
        relayer_fee: u64,
        method: [u8; 4],
    ) -> Result<()> {
        initialize_handler(
            ctx,
            RelaySettings {
                token,
                max_priority_fee,
                relayer_fee,
                method,
            },
        )
    }

    /// Forwards `method ++ payload` to the program owning `target`, then pulls
    /// the cost of the transaction plus the relayer fee from the target's token
    /// account (via the allowance granted to the config PDA) into the
    /// receiver's token account. The accounts the forwarded call needs are
    /// passed as remaining accounts.
    ///
    /// # Arguments
    /// * `ctx`             - The context containing the relayer, config PDA,
    ///                       target and its program, token accounts, and the
    ///                       instructions sysvar.
    /// * `payload`         - Call data without the method selector.
    /// * `refund_receiver` - Who gets reimbursed; the default pubkey means the
    ///                       relayer.
    ///
    /// # Errors
    /// `FeeExceeded` when the transaction bids a compute-unit price above the
    /// ceiling (checked before any target or token account), `DuplicateRelay`
    /// or `RelayNotTopLevel` unless this is the only, top-level relay of the
    /// transaction, `CallFailed` when the target reports failure, token
    /// program errors when the allowance or balance is short.
    pub fn relay<'info>(
        ctx: Context<'_, '_, '_, 'info, Relay<'info>>,
        payload: Vec<u8>,
        refund_receiver: Pubkey,
    ) -> Result<()> {
        relay_handler(ctx, payload, refund_receiver)
    }

    /// Sweeps the whole balance of a token account held by the config PDA to
    /// `destination`. Works in any state; an empty vault is a no-op.
    ///
    /// # Arguments
    /// * `ctx` - The context containing the `owner` signer, the `config` PDA,
    ///           the `mint` of the stray tokens, the `vault` token account
    ///           whose authority is the config PDA, and the `destination`
    ///           token account.
    ///
    /// # Errors
    /// `NotOwner` when the signer is not the instance owner.
    pub fn recover_funds(ctx: Context<RecoverFunds>) -> Result<()> {
        recover_funds_handler(ctx)
    }
}
