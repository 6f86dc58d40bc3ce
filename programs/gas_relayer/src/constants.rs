use anchor_lang::prelude::*;

#[constant]
pub const CONFIG_SEED: &[u8] = b"relayer_config";

/// Base fee charged by the runtime for every transaction signature.
pub const LAMPORTS_PER_SIGNATURE: u64 = 5_000;

/// Compute-unit prices are quoted in micro-lamports.
pub const MICRO_LAMPORTS_PER_LAMPORT: u128 = 1_000_000;

/// Runtime default compute-unit limit per instruction when the transaction
/// does not request one.
pub const DEFAULT_INSTRUCTION_COMPUTE_UNIT_LIMIT: u64 = 200_000;

/// Highest compute-unit limit a transaction may request.
pub const MAX_COMPUTE_UNIT_LIMIT: u64 = 1_400_000;

pub mod compute_budget_program {
    anchor_lang::declare_id!("ComputeBudget111111111111111111111111111111");
}
