pub mod fee_guard;
pub mod forwarder;
pub mod reimbursement;

pub use fee_guard::*;
pub use forwarder::*;
pub use reimbursement::*;
