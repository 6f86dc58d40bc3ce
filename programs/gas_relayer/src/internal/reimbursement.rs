use anchor_lang::{prelude::*, solana_program::compute_units::sol_remaining_compute_units};
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::{
    constants::{LAMPORTS_PER_SIGNATURE, MICRO_LAMPORTS_PER_LAMPORT},
    internal::TransactionFees,
    state::Config,
};

/// Tracks compute units spent since the relay started. Reported in
/// `CallRelayed`; billing uses the transaction's compute-unit limit instead.
pub struct GasMeter {
    start: u64,
}

impl GasMeter {
    pub fn start() -> Self {
        Self {
            start: sol_remaining_compute_units(),
        }
    }

    pub fn units_used(&self) -> u64 {
        self.start.saturating_sub(sol_remaining_compute_units())
    }
}

/// Token amount owed to the receiver, assuming the token is pegged 1:1 to
/// lamports. Mirrors what the runtime charges the fee payer, which bills the
/// priority fee on the requested compute-unit limit, not on usage:
///
/// ```text
/// owed = signatures * LAMPORTS_PER_SIGNATURE
///      + ceil(compute_unit_limit * compute_unit_price / 1_000_000)
///      + relayer_fee
/// ```
pub fn compute_owed(fees: &TransactionFees, relayer_fee: u64) -> Result<u64> {
    let signature_fee = fees.signature_count as u128 * LAMPORTS_PER_SIGNATURE as u128;
    let priority_fee = (fees.compute_unit_limit as u128 * fees.compute_unit_price as u128)
        .div_ceil(MICRO_LAMPORTS_PER_LAMPORT);

    let owed = signature_fee + priority_fee + relayer_fee as u128;
    u64::try_from(owed).map_err(|_| error!(ReimbursementError::MathOverflow))
}

/// Resolves who gets reimbursed: the explicit receiver, or the relayer when
/// none was given.
pub fn refund_receiver(requested: Pubkey, relayer: Pubkey) -> Pubkey {
    if requested == Pubkey::default() {
        relayer
    } else {
        requested
    }
}

pub struct Reimbursement<'a, 'info> {
    pub config: &'a Account<'info, Config>,
    pub mint: &'a InterfaceAccount<'info, Mint>,
    pub from: &'a InterfaceAccount<'info, TokenAccount>,
    pub to: &'a mut InterfaceAccount<'info, TokenAccount>,
    pub token_program: &'a Interface<'info, TokenInterface>,
}

impl Reimbursement<'_, '_> {
    /// Pulls `amount` out of the target's token account using the allowance it
    /// granted to the config PDA. Allowance and balance are enforced by the
    /// token program.
    pub fn pay(self, amount: u64) -> Result<()> {
        let balance_before = self.to.amount;

        let seeds = self.config.signer_seeds();
        let signer_seeds = &[&seeds[..]];
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            TransferChecked {
                mint: self.mint.to_account_info(),
                from: self.from.to_account_info(),
                to: self.to.to_account_info(),
                authority: self.config.to_account_info(),
            },
            signer_seeds,
        );
        transfer_checked(cpi_ctx, amount, self.mint.decimals)?;

        // Transfer-fee mints would credit less than requested.
        self.to.reload()?;
        let received = self.to.amount.saturating_sub(balance_before);
        require!(received >= amount, ReimbursementError::TokenTransferFailed);

        Ok(())
    }
}

#[error_code(offset = 6300)]
pub enum ReimbursementError {
    #[msg("Receiver token account is not owned by the refund receiver")]
    InvalidReceiver,
    #[msg("Reimbursement amount overflows")]
    MathOverflow,
    #[msg("Receiver was not credited the full reimbursement")]
    TokenTransferFailed,
}
