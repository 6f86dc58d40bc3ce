use anchor_lang::{prelude::*, solana_program::sysvar};
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::CONFIG_SEED,
    internal::{
        compute_owed, forward_call, read_transaction_fees, refund_receiver,
        within_priority_fee_ceiling, FeeGuardError, ForwarderError, GasMeter, Reimbursement,
        ReimbursementError,
    },
    state::{Config, ConfigError},
    ID,
};

#[derive(Accounts)]
pub struct Relay<'info> {
    /// The account submitting the relay. Reimbursed unless a refund receiver
    /// is given.
    pub relayer: Signer<'info>,

    /// The relay instance.
    /// - Must be `Active`
    /// - Mutable to hold the reentrancy lock while the target runs
    #[account(
        mut,
        seeds = [CONFIG_SEED, config.owner.as_ref()],
        bump = config.bump,
        constraint = config.initialized() @ ConfigError::NotInitialized,
        constraint = !config.locked @ ForwarderError::ReentrantCall,
    )]
    pub config: Account<'info, Config>,

    /// Checked right after the config so an overpriced transaction is
    /// rejected before any target or token account is looked at.
    /// CHECK: Validated by address constraint
    #[account(
        address = sysvar::instructions::ID,
        constraint = within_priority_fee_ceiling(
            &instructions_sysvar,
            config.max_priority_fee(),
        )? @ FeeGuardError::FeeExceeded,
    )]
    pub instructions_sysvar: UncheckedAccount<'info>,

    /// The wallet whose call is forwarded and who pays for it.
    /// CHECK: Opaque to the relay; only its owning program and token account
    /// are checked.
    pub target: UncheckedAccount<'info>,

    /// The program that owns `target` and receives the forwarded call.
    /// CHECK: Must be executable, own `target`, and not be this program.
    #[account(
        executable,
        constraint = target_program.key() == *target.owner @ ForwarderError::InvalidTargetProgram,
        constraint = target_program.key() != ID @ ForwarderError::InvalidTargetProgram,
    )]
    pub target_program: UncheckedAccount<'info>,

    /// The configured reimbursement token mint.
    #[account(address = config.token() @ ConfigError::InvalidToken)]
    pub mint: InterfaceAccount<'info, Mint>,

    /// The target's token account. Must have approved the config PDA as
    /// delegate for at least the reimbursed amount.
    #[account(
        mut,
        token::mint = mint,
        token::authority = target,
        token::token_program = token_program,
    )]
    pub target_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Token account credited with the reimbursement.
    #[account(
        mut,
        token::mint = mint,
        token::token_program = token_program,
    )]
    pub receiver_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn relay_handler<'info>(
    ctx: Context<'_, '_, '_, 'info, Relay<'info>>,
    payload: Vec<u8>,
    refund_receiver_key: Pubkey,
) -> Result<()> {
    let meter = GasMeter::start();
    let settings = ctx.accounts.config.settings()?.clone();

    // 1. Fee guard: the ceiling was enforced by the account constraints
    let fees = read_transaction_fees(&ctx.accounts.instructions_sysvar)?;

    let receiver = refund_receiver(refund_receiver_key, ctx.accounts.relayer.key());
    require_keys_eq!(
        ctx.accounts.receiver_token_account.owner,
        receiver,
        ReimbursementError::InvalidReceiver
    );

    // 2. Lock and persist before handing control to the target
    ctx.accounts.config.locked = true;
    ctx.accounts.config.exit(&ID)?;

    // 3. Forward the call
    forward_call(
        &ctx.accounts.target_program.to_account_info(),
        ctx.remaining_accounts,
        &settings.method,
        &payload,
    )?;

    // 4. Reimburse
    let compute_units = meter.units_used();
    let amount = compute_owed(&fees, settings.relayer_fee)?;

    Reimbursement {
        config: &ctx.accounts.config,
        mint: &ctx.accounts.mint,
        from: &ctx.accounts.target_token_account,
        to: &mut ctx.accounts.receiver_token_account,
        token_program: &ctx.accounts.token_program,
    }
    .pay(amount)?;

    ctx.accounts.config.locked = false;

    emit!(CallRelayed {
        config: ctx.accounts.config.key(),
        target: ctx.accounts.target.key(),
        relayer: ctx.accounts.relayer.key(),
        receiver,
        compute_units,
        amount,
    });

    Ok(())
}

#[event]
pub struct CallRelayed {
    pub config: Pubkey,
    pub target: Pubkey,
    pub relayer: Pubkey,
    pub receiver: Pubkey,
    pub compute_units: u64,
    pub amount: u64,
}
