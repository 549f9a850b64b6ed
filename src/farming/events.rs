//! Events for Yield Farming

use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when a pool is registered
#[odra::event]
pub struct PoolAdded {
    pub pool_id: u32,
    pub asset: Address,
    pub weight: u64,
}

/// Event emitted when a pool is reweighted
#[odra::event]
pub struct PoolWeightUpdated {
    pub pool_id: u32,
    pub old_weight: u64,
    pub new_weight: u64,
}

/// Event emitted when assets are staked
#[odra::event]
pub struct Deposit {
    pub user: Address,
    pub pool_id: u32,
    pub amount: U256,
}

/// Event emitted when assets are unstaked
#[odra::event]
pub struct Withdraw {
    pub user: Address,
    pub pool_id: u32,
    pub amount: U256,
}

/// Event emitted when a stake is pulled out without its reward
#[odra::event]
pub struct EmergencyWithdraw {
    pub user: Address,
    pub pool_id: u32,
    pub amount: U256,
}

/// Event emitted when pending reward is paid out
#[odra::event]
pub struct RewardPaid {
    pub user: Address,
    pub pool_id: u32,
    pub amount: U256,
}

#[odra::event]
pub struct EmissionRateUpdated {
    pub old_rate: U256,
    pub new_rate: U256,
}

#[odra::event]
pub struct MultiplierUpdated {
    pub old_multiplier: u64,
    pub new_multiplier: u64,
}

#[odra::event]
pub struct DevAddressUpdated {
    pub old_dev: Address,
    pub new_dev: Address,
}

/// Event emitted when the bonus pool registers its stake
#[odra::event]
pub struct FarmingStarted {
    pub pool_id: u32,
    pub asset: Address,
    pub amount: U256,
}

/// Event emitted when the bonus pool forwards its reward
#[odra::event]
pub struct Harvested {
    pub pool_id: u32,
    pub receiver: Address,
    pub amount: U256,
}

/// Event emitted when the bonus pool pulls its stake out without reward
#[odra::event]
pub struct StakeRecovered {
    pub pool_id: u32,
    pub admin: Address,
    pub amount: U256,
}

#[odra::event]
pub struct ReceiverUpdated {
    pub old_receiver: Address,
    pub new_receiver: Address,
}

#[odra::event]
pub struct AdminUpdated {
    pub old_admin: Address,
    pub new_admin: Address,
}
