//! Yield Farming - weighted stake pools emitting the reward token
//!
//! `StakePoolRegistry` owns every pool and stake; `BonusRewardPool` is a
//! satellite that farms one registry pool on behalf of a separate receiver.

pub mod pool_registry;
pub mod bonus_pool;
pub mod errors;
pub mod events;


pub use pool_registry::{StakePoolRegistry, PoolInfo, UserInfo, EmissionSchedule, STAKING_POOL_ID};
pub use bonus_pool::{BonusRewardPool, FarmInfo};
pub use errors::FarmingError;
pub use events::*;
