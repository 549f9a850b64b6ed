//! Error types for Yield Farming

use odra::prelude::*;

#[odra::odra_error]
pub enum FarmingError {
    /// Caller is not the owner, admin or dev required by the entry point
    Unauthorized = 1,
    /// Withdrawal exceeds the caller's recorded stake
    InsufficientStake = 2,
    /// Bonus pool farming was already started
    AlreadyStarted = 3,
    /// Share or emission computation left the fixed-point domain
    ArithmeticOverflow = 4,
    /// Pool not found
    PoolNotFound = 5,
    /// Pool 0 is entered through enter_staking / leave_staking only
    UseStakingEntryPoint = 6,
    /// Invalid init or setter argument
    InvalidConfiguration = 7,
}
