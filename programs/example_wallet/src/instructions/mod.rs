pub mod approve_delegate;
pub mod approve_transfer;
pub mod create_wallet;
pub mod exec_transfer;

pub use approve_delegate::*;
pub use approve_transfer::*;
pub use create_wallet::*;
pub use exec_transfer::*;
