use anchor_lang::{
    prelude::*,
    solana_program::{
        instruction::Instruction,
        sysvar::instructions::{load_current_index_checked, load_instruction_at_checked},
    },
    Discriminator,
};

use crate::{
    constants::{
        compute_budget_program, DEFAULT_INSTRUCTION_COMPUTE_UNIT_LIMIT, MAX_COMPUTE_UNIT_LIMIT,
    },
    instruction::Relay,
    ID,
};

/// `ComputeBudgetInstruction::SetComputeUnitLimit` tag.
const SET_COMPUTE_UNIT_LIMIT: u8 = 2;
/// `ComputeBudgetInstruction::SetComputeUnitPrice` tag.
const SET_COMPUTE_UNIT_PRICE: u8 = 3;

/// Fee metadata of the enclosing transaction, as visible through the
/// instructions sysvar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionFees {
    /// Compute-unit price in micro-lamports (0 when none was requested)
    pub compute_unit_price: u64,
    /// Compute units the priority fee is charged on: the requested limit, or
    /// the runtime default for the transaction's instructions
    pub compute_unit_limit: u64,
    /// Number of distinct signers across all instructions
    pub signature_count: u64,
}

/// Whether the transaction bids a compute-unit price at or below `max_priority_fee`.
/// Evaluated as the first account constraint of `relay`.
pub fn within_priority_fee_ceiling(
    instructions_sysvar: &AccountInfo,
    max_priority_fee: u64,
) -> Result<bool> {
    let mut compute_unit_price = 0;
    for ix in transaction_instructions(instructions_sysvar)? {
        if let Some(price) = compute_unit_price_of(&ix) {
            compute_unit_price = price;
        }
    }
    Ok(compute_unit_price <= max_priority_fee)
}

/// Collects what the transaction costs its fee payer. The transaction fee is
/// charged once, so exactly one `relay` may claim it: the current instruction
/// must be a top-level `relay` and no other `relay` may appear alongside it.
pub fn read_transaction_fees(instructions_sysvar: &AccountInfo) -> Result<TransactionFees> {
    let current = load_current_index_checked(instructions_sysvar)? as usize;
    let instructions = transaction_instructions(instructions_sysvar)?;
    require!(
        current < instructions.len(),
        FeeGuardError::MalformedInstructionsSysvar
    );

    let mut compute_unit_price = 0;
    let mut requested_limit = None;
    let mut default_limit: u64 = 0;
    let mut signers: Vec<Pubkey> = Vec::new();

    for (index, ix) in instructions.iter().enumerate() {
        if index == current {
            require!(is_relay(ix), FeeGuardError::RelayNotTopLevel);
        } else {
            require!(!is_relay(ix), FeeGuardError::DuplicateRelay);
        }

        if ix.program_id == compute_budget_program::ID {
            if let Some(price) = compute_unit_price_of(ix) {
                compute_unit_price = price;
            }
            if let Some(limit) = parse_compute_unit_limit(&ix.data) {
                requested_limit = Some(limit);
            }
        } else {
            default_limit = default_limit.saturating_add(DEFAULT_INSTRUCTION_COMPUTE_UNIT_LIMIT);
        }

        for meta in ix.accounts.iter().filter(|m| m.is_signer) {
            if !signers.contains(&meta.pubkey) {
                signers.push(meta.pubkey);
            }
        }
    }

    Ok(TransactionFees {
        compute_unit_price,
        compute_unit_limit: requested_limit
            .unwrap_or(default_limit)
            .min(MAX_COMPUTE_UNIT_LIMIT),
        signature_count: (signers.len() as u64).max(1),
    })
}

fn transaction_instructions(instructions_sysvar: &AccountInfo) -> Result<Vec<Instruction>> {
    // Also rejects any account that is not the instructions sysvar.
    load_current_index_checked(instructions_sysvar)?;

    let mut instructions = Vec::new();
    while let Ok(ix) = load_instruction_at_checked(instructions.len(), instructions_sysvar) {
        instructions.push(ix);
    }
    Ok(instructions)
}

fn compute_unit_price_of(ix: &Instruction) -> Option<u64> {
    if ix.program_id == compute_budget_program::ID {
        parse_compute_unit_price(&ix.data)
    } else {
        None
    }
}

pub fn is_relay(ix: &Instruction) -> bool {
    ix.program_id == ID && ix.data.starts_with(Relay::DISCRIMINATOR)
}

/// Decodes a compute budget instruction, returning the price when it is a
/// `SetComputeUnitPrice`.
pub fn parse_compute_unit_price(data: &[u8]) -> Option<u64> {
    match data {
        [SET_COMPUTE_UNIT_PRICE, price @ ..] if price.len() >= 8 => {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(&price[..8]);
            Some(u64::from_le_bytes(bytes))
        }
        _ => None,
    }
}

pub fn parse_compute_unit_limit(data: &[u8]) -> Option<u64> {
    match data {
        [SET_COMPUTE_UNIT_LIMIT, limit @ ..] if limit.len() >= 4 => {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&limit[..4]);
            Some(u32::from_le_bytes(bytes) as u64)
        }
        _ => None,
    }
}

#[error_code(offset = 6100)]
pub enum FeeGuardError {
    #[msg("maxPriorityFee is higher than expected")]
    FeeExceeded,
    #[msg("Instructions sysvar could not be read")]
    MalformedInstructionsSysvar,
    #[msg("Only one relay per transaction")]
    DuplicateRelay,
    #[msg("Relay must be a top-level instruction")]
    RelayNotTopLevel,
}
