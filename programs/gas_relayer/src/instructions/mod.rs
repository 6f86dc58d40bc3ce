pub mod create;
pub mod initialize;
pub mod recover_funds;
pub mod relay;

pub use create::*;
pub use initialize::*;
pub use recover_funds::*;
pub use relay::*;
