use anchor_lang::prelude::*;

#[error_code]
pub enum WalletError {
    #[msg("Unauthorized: caller is not the wallet owner")]
    Unauthorized,

    #[msg("Wallet cannot cover the transfer and stay rent exempt")]
    InsufficientFunds,
}
