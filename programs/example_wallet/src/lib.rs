#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod errors;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("APhc4ijXkyzadk2E2K3VoeNqCo8zfhQbe69cHi9detRt");

#[program]
pub mod example_wallet {
    use super::*;

    /// Creates the signer's wallet PDA.
    pub fn create_wallet(ctx: Context<CreateWallet>) -> Result<()> {
        instructions::create_wallet::create_wallet_handler(ctx)
    }

    /// Owner approves one lamport transfer at the current nonce.
    pub fn approve_transfer(ctx: Context<ApproveTransfer>, to: Pubkey, lamports: u64) -> Result<()> {
        instructions::approve_transfer::approve_transfer_handler(ctx, to, lamports)
    }

    /// Executes the approved transfer; callable by anyone, including a relay.
    /// Uses a fixed 4-byte selector so relays configured with it can reach it.
    #[instruction(discriminator = [0x6a, 0x76, 0x12, 0x02])]
    pub fn exec_transfer(
        ctx: Context<ExecTransfer>,
        to: Pubkey,
        lamports: u64,
        nonce: u64,
    ) -> Result<bool> {
        instructions::exec_transfer::exec_transfer_handler(ctx, to, lamports, nonce)
    }

    /// Owner grants a token allowance from the wallet's token account.
    pub fn approve_delegate(ctx: Context<ApproveDelegate>, amount: u64) -> Result<()> {
        instructions::approve_delegate::approve_delegate_handler(ctx, amount)
    }
}
