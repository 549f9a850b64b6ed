//! Stake Pool Registry - weighted pools sharing one per-block reward emission
//!
//! Every pool owns a slice of the emission proportional to its weight.
//! Within a pool, reward is split by stake through `acc_reward_per_share`,
//! the reward earned by one unit of stake since the pool was created.
//! A pool is always settled before any stake in it changes, and pending
//! reward is paid before the stake amount moves.
//!
//! Pool 0 stakes the reward token itself and is entered through
//! `enter_staking` / `leave_staking`, which mint and burn a 1:1 wrapped receipt.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::FarmingError;
use super::events::*;
use crate::events::OwnershipTransferred;
use crate::math::{RewardMath, SafeMath};
use crate::token::{Cep18TokenContractRef, MintableTokenContractRef};

/// Pool id reserved for staking the reward token
pub const STAKING_POOL_ID: u32 = 0;

/// Pool information
#[odra::odra_type]
pub struct PoolInfo {
    /// Staked asset address
    pub asset: Address,
    /// Share of the total emission
    pub weight: u64,
    /// Last block the pool was settled at
    pub last_reward_block: u64,
    /// Reward per unit of stake, scaled by `ACC_REWARD_PRECISION`
    pub acc_reward_per_share: U256,
    /// Total staked in pool
    pub total_staked: U256,
}

/// User stake information
#[odra::odra_type]
pub struct UserInfo {
    /// Amount staked
    pub amount: U256,
    /// `amount * acc_reward_per_share` already credited to the user
    pub reward_debt: U256,
}

/// Emission parameters, as read by satellites re-deriving pool accounting
#[odra::odra_type]
pub struct EmissionSchedule {
    pub reward_per_block: U256,
    pub bonus_multiplier: u64,
    pub total_weight: u64,
    pub start_block: u64,
    /// Block time units per emission block
    pub block_interval: u64,
}

/// Reward `pool` accrued since its last settlement, `None` when nothing accrues.
fn unsettled_emission(
    pool: &PoolInfo,
    schedule: &EmissionSchedule,
    current_block: u64,
) -> Result<Option<U256>, FarmingError> {
    if current_block <= pool.last_reward_block
        || pool.total_staked.is_zero()
        || pool.weight == 0
        || schedule.total_weight == 0
    {
        return Ok(None);
    }

    RewardMath::emission_for(
        current_block - pool.last_reward_block,
        schedule.bonus_multiplier,
        schedule.reward_per_block,
        pool.weight,
        schedule.total_weight,
    )
    .map(Some)
}

/// `acc_reward_per_share` of `pool` as if it were settled at `current_block`
pub fn projected_acc_reward_per_share(
    pool: &PoolInfo,
    schedule: &EmissionSchedule,
    current_block: u64,
) -> Result<U256, FarmingError> {
    match unsettled_emission(pool, schedule, current_block)? {
        Some(reward) => SafeMath::add(
            pool.acc_reward_per_share,
            RewardMath::acc_increment(reward, pool.total_staked)?,
        ),
        None => Ok(pool.acc_reward_per_share),
    }
}

/// Stake Pool Registry contract
#[odra::module]
pub struct StakePoolRegistry {
    /// Reward token address; the registry must own it to mint
    reward_token: Var<Address>,
    /// Receipt token minted for pool 0 stakes
    wrapped_token: Var<Address>,
    /// Owner address (pool and emission management)
    owner: Var<Address>,
    /// Receives the dev cut of every settlement
    dev_address: Var<Address>,
    reward_per_block: Var<U256>,
    bonus_multiplier: Var<u64>,
    /// Sum of all pool weights
    total_weight: Var<u64>,
    start_block: Var<u64>,
    block_interval: Var<u64>,
    /// Pool information by pool ID; append-only
    pools: Mapping<u32, PoolInfo>,
    pool_count: Var<u32>,
    /// User stakes: (pool_id, user) -> UserInfo
    user_info: Mapping<(u32, Address), UserInfo>,
}

#[odra::module]
impl StakePoolRegistry {
    /// Initialize the registry and register pool 0 for the reward token
    ///
    /// # Arguments
    /// * `reward_per_block` - reward emitted per block across all pools
    /// * `start_block` - first block that accrues reward
    /// * `block_interval` - block time units per block, must be non-zero
    /// * `staking_pool_weight` - weight of pool 0
    pub fn init(
        &mut self,
        reward_token: Address,
        wrapped_token: Address,
        dev_address: Address,
        reward_per_block: U256,
        start_block: u64,
        block_interval: u64,
        staking_pool_weight: u64,
    ) {
        if block_interval == 0 {
            self.env().revert(FarmingError::InvalidConfiguration);
        }

        let caller = self.env().caller();
        self.reward_token.set(reward_token);
        self.wrapped_token.set(wrapped_token);
        self.owner.set(caller);
        self.dev_address.set(dev_address);
        self.reward_per_block.set(reward_per_block);
        self.bonus_multiplier.set(1);
        self.total_weight.set(0);
        self.start_block.set(start_block);
        self.block_interval.set(block_interval);
        self.pool_count.set(0);

        self.push_pool(reward_token, staking_pool_weight);
    }

    // ========================================
    // Pool Management (Owner)
    // ========================================

    /// Register a new pool and return its id
    ///
    /// With `with_update` every pool is settled first, so the change in
    /// total weight cannot reprice blocks that have not been settled yet.
    pub fn add_pool(&mut self, weight: u64, asset: Address, with_update: bool) -> u32 {
        self.only_owner();
        if with_update {
            self.mass_update_pools();
        }
        self.push_pool(asset, weight)
    }

    /// Change a pool's weight; same settlement rule as `add_pool`
    pub fn set_pool_weight(&mut self, pool_id: u32, weight: u64, with_update: bool) {
        self.only_owner();
        self.load_pool(pool_id);
        if with_update {
            self.mass_update_pools();
        }

        let mut pool = self.load_pool(pool_id);
        let old_weight = pool.weight;
        let total_weight = self
            .total_weight
            .get_or_default()
            .checked_sub(old_weight)
            .and_then(|total| total.checked_add(weight));
        let total_weight = self.checked(total_weight.ok_or(FarmingError::ArithmeticOverflow));

        pool.weight = weight;
        self.pools.set(&pool_id, pool);
        self.total_weight.set(total_weight);

        self.env().emit_event(PoolWeightUpdated {
            pool_id,
            old_weight,
            new_weight: weight,
        });
    }

    /// Change the per-block emission. Without `with_update` the new rate
    /// also prices every block not yet settled.
    pub fn update_emission_rate(&mut self, reward_per_block: U256, with_update: bool) {
        self.only_owner();
        if with_update {
            self.mass_update_pools();
        }

        let old_rate = self.reward_per_block.get_or_default();
        self.reward_per_block.set(reward_per_block);
        self.env().emit_event(EmissionRateUpdated {
            old_rate,
            new_rate: reward_per_block,
        });
    }

    /// Change the bonus multiplier; same settlement rule as `update_emission_rate`
    pub fn update_multiplier(&mut self, multiplier: u64, with_update: bool) {
        self.only_owner();
        if with_update {
            self.mass_update_pools();
        }

        let old_multiplier = self.bonus_multiplier.get_or_default();
        self.bonus_multiplier.set(multiplier);
        self.env().emit_event(MultiplierUpdated {
            old_multiplier,
            new_multiplier: multiplier,
        });
    }

    /// Rotate the dev address; only the current dev may do this
    pub fn set_dev_address(&mut self, new_dev: Address) {
        let old_dev = self.get_dev_address();
        if self.env().caller() != old_dev {
            self.env().revert(FarmingError::Unauthorized);
        }
        self.dev_address.set(new_dev);
        self.env().emit_event(DevAddressUpdated { old_dev, new_dev });
    }

    pub fn transfer_ownership(&mut self, new_owner: Address) {
        self.only_owner();
        let previous_owner = self.get_owner();
        self.owner.set(new_owner);
        self.env().emit_event(OwnershipTransferred { previous_owner, new_owner });
    }

    // ========================================
    // Settlement
    // ========================================

    /// Bring a pool's accumulator up to the current block
    pub fn settle_pool(&mut self, pool_id: u32) {
        self.update_pool(pool_id);
    }

    pub fn mass_update_pools(&mut self) {
        let count = self.pool_count.get_or_default();
        for pool_id in 0..count {
            self.update_pool(pool_id);
        }
    }

    // ========================================
    // Staking Functions
    // ========================================

    /// Stake `amount` of the pool's asset; `amount == 0` only harvests
    pub fn deposit(&mut self, pool_id: u32, amount: U256) {
        if pool_id == STAKING_POOL_ID {
            self.env().revert(FarmingError::UseStakingEntryPoint);
        }
        let caller = self.env().caller();
        self.deposit_for(pool_id, caller, amount);
    }

    /// Unstake `amount` of the pool's asset; `amount == 0` only harvests
    pub fn withdraw(&mut self, pool_id: u32, amount: U256) {
        if pool_id == STAKING_POOL_ID {
            self.env().revert(FarmingError::UseStakingEntryPoint);
        }
        let caller = self.env().caller();
        self.withdraw_for(pool_id, caller, amount);
    }

    /// Stake the reward token into pool 0, receiving wrapped tokens 1:1
    pub fn enter_staking(&mut self, amount: U256) {
        let caller = self.env().caller();
        self.deposit_for(STAKING_POOL_ID, caller, amount);
        if !amount.is_zero() {
            self.wrapped().mint(caller, amount);
        }
    }

    /// Unstake the reward token from pool 0, burning wrapped tokens 1:1
    pub fn leave_staking(&mut self, amount: U256) {
        let caller = self.env().caller();
        self.withdraw_for(STAKING_POOL_ID, caller, amount);
        if !amount.is_zero() {
            self.wrapped().burn(caller, amount);
        }
    }

    /// Return the caller's whole stake without paying any reward
    pub fn emergency_withdraw(&mut self, pool_id: u32) {
        let caller = self.env().caller();
        let mut pool = self.load_pool(pool_id);
        let stake = self.stake_of(pool_id, caller);
        let amount = stake.amount;

        pool.total_staked = self.checked(SafeMath::sub(pool.total_staked, amount));
        let asset = pool.asset;
        self.pools.set(&pool_id, pool);
        self.user_info.set(&(pool_id, caller), UserInfo {
            amount: U256::zero(),
            reward_debt: U256::zero(),
        });

        if !amount.is_zero() {
            if pool_id == STAKING_POOL_ID {
                self.wrapped().burn(caller, amount);
            }
            Cep18TokenContractRef::new(self.env(), asset).transfer(caller, amount);
        }

        self.env().emit_event(EmergencyWithdraw {
            user: caller,
            pool_id,
            amount,
        });
    }

    // ========================================
    // View Functions
    // ========================================

    /// Reward `user` would receive if the pool were settled now
    pub fn pending_reward(&self, pool_id: u32, user: Address) -> U256 {
        let pool = self.load_pool(pool_id);
        let schedule = self.get_emission_schedule();
        let acc = self.checked(projected_acc_reward_per_share(&pool, &schedule, self.current_block()));
        let stake = self.stake_of(pool_id, user);
        self.checked(RewardMath::pending(stake.amount, acc, stake.reward_debt))
    }

    pub fn get_pool_info(&self, pool_id: u32) -> Option<PoolInfo> {
        self.pools.get(&pool_id)
    }

    pub fn get_user_info(&self, pool_id: u32, user: Address) -> UserInfo {
        self.stake_of(pool_id, user)
    }

    pub fn get_emission_schedule(&self) -> EmissionSchedule {
        EmissionSchedule {
            reward_per_block: self.reward_per_block.get_or_default(),
            bonus_multiplier: self.bonus_multiplier.get_or_default(),
            total_weight: self.total_weight.get_or_default(),
            start_block: self.start_block.get_or_default(),
            block_interval: self.block_interval.get_or_default(),
        }
    }

    /// Reward multiplier over the block range `[from, to)`
    pub fn get_multiplier(&self, from: u64, to: u64) -> U256 {
        U256::from(to.saturating_sub(from)) * U256::from(self.bonus_multiplier.get_or_default())
    }

    pub fn pool_length(&self) -> u32 {
        self.pool_count.get_or_default()
    }

    pub fn current_block(&self) -> u64 {
        let interval = self
            .block_interval
            .get_or_revert_with(FarmingError::InvalidConfiguration);
        self.env().get_block_time() / interval
    }

    pub fn get_owner(&self) -> Address {
        self.owner.get_or_revert_with(FarmingError::Unauthorized)
    }

    pub fn get_dev_address(&self) -> Address {
        self.dev_address.get_or_revert_with(FarmingError::Unauthorized)
    }

    pub fn get_reward_token(&self) -> Address {
        self.reward_token.get_or_revert_with(FarmingError::InvalidConfiguration)
    }

    pub fn get_wrapped_token(&self) -> Address {
        self.wrapped_token.get_or_revert_with(FarmingError::InvalidConfiguration)
    }

    // ========================================
    // Internal Functions
    // ========================================

    fn push_pool(&mut self, asset: Address, weight: u64) -> u32 {
        let pool_id = self.pool_count.get_or_default();
        let last_reward_block = self.current_block().max(self.start_block.get_or_default());
        let total_weight = self.total_weight.get_or_default().checked_add(weight);
        let total_weight = self.checked(total_weight.ok_or(FarmingError::ArithmeticOverflow));

        self.pools.set(&pool_id, PoolInfo {
            asset,
            weight,
            last_reward_block,
            acc_reward_per_share: U256::zero(),
            total_staked: U256::zero(),
        });
        self.pool_count.set(pool_id + 1);
        self.total_weight.set(total_weight);

        self.env().emit_event(PoolAdded { pool_id, asset, weight });
        pool_id
    }

    fn update_pool(&mut self, pool_id: u32) -> PoolInfo {
        let mut pool = self.load_pool(pool_id);
        let current_block = self.current_block();
        if current_block <= pool.last_reward_block {
            return pool;
        }

        let schedule = self.get_emission_schedule();
        if let Some(reward) = self.checked(unsettled_emission(&pool, &schedule, current_block)) {
            let increment = self.checked(RewardMath::acc_increment(reward, pool.total_staked));
            pool.acc_reward_per_share = self.checked(SafeMath::add(pool.acc_reward_per_share, increment));
            self.mint_reward(reward);
        }

        pool.last_reward_block = current_block;
        self.pools.set(&pool_id, pool.clone());
        pool
    }

    /// Mint `reward` to the registry plus the dev cut on top
    fn mint_reward(&mut self, reward: U256) {
        let dev_cut = RewardMath::dev_cut(reward);
        let dev = self.get_dev_address();
        let self_address = Address::from(self.env().self_address());
        let mut token = MintableTokenContractRef::new(self.env(), self.get_reward_token());

        if !dev_cut.is_zero() {
            token.mint(dev, dev_cut);
        }
        if !reward.is_zero() {
            token.mint(self_address, reward);
        }
    }

    fn deposit_for(&mut self, pool_id: u32, user: Address, amount: U256) {
        let mut pool = self.update_pool(pool_id);
        let mut stake = self.stake_of(pool_id, user);

        if !stake.amount.is_zero() {
            let pending = self.checked(RewardMath::pending(
                stake.amount,
                pool.acc_reward_per_share,
                stake.reward_debt,
            ));
            self.pay_reward(user, pool_id, pending);
        }

        if !amount.is_zero() {
            let self_address = Address::from(self.env().self_address());
            Cep18TokenContractRef::new(self.env(), pool.asset).transfer_from(user, self_address, amount);
            stake.amount = self.checked(SafeMath::add(stake.amount, amount));
            pool.total_staked = self.checked(SafeMath::add(pool.total_staked, amount));
        }

        stake.reward_debt = self.checked(RewardMath::accrued(stake.amount, pool.acc_reward_per_share));
        self.pools.set(&pool_id, pool);
        self.user_info.set(&(pool_id, user), stake);

        self.env().emit_event(Deposit { user, pool_id, amount });
    }

    fn withdraw_for(&mut self, pool_id: u32, user: Address, amount: U256) {
        if self.stake_of(pool_id, user).amount < amount {
            self.env().revert(FarmingError::InsufficientStake);
        }

        let mut pool = self.update_pool(pool_id);
        let mut stake = self.stake_of(pool_id, user);

        let pending = self.checked(RewardMath::pending(
            stake.amount,
            pool.acc_reward_per_share,
            stake.reward_debt,
        ));
        self.pay_reward(user, pool_id, pending);

        if !amount.is_zero() {
            stake.amount = self.checked(SafeMath::sub(stake.amount, amount));
            pool.total_staked = self.checked(SafeMath::sub(pool.total_staked, amount));
            Cep18TokenContractRef::new(self.env(), pool.asset).transfer(user, amount);
        }

        stake.reward_debt = self.checked(RewardMath::accrued(stake.amount, pool.acc_reward_per_share));
        self.pools.set(&pool_id, pool);
        self.user_info.set(&(pool_id, user), stake);

        self.env().emit_event(Withdraw { user, pool_id, amount });
    }

    fn pay_reward(&mut self, user: Address, pool_id: u32, amount: U256) {
        if amount.is_zero() {
            return;
        }
        Cep18TokenContractRef::new(self.env(), self.get_reward_token()).transfer(user, amount);
        self.env().emit_event(RewardPaid { user, pool_id, amount });
    }

    fn wrapped(&self) -> MintableTokenContractRef {
        MintableTokenContractRef::new(self.env(), self.get_wrapped_token())
    }

    fn load_pool(&self, pool_id: u32) -> PoolInfo {
        self.pools.get(&pool_id)
            .unwrap_or_revert_with(&self.env(), FarmingError::PoolNotFound)
    }

    fn stake_of(&self, pool_id: u32, user: Address) -> UserInfo {
        self.user_info.get(&(pool_id, user)).unwrap_or(UserInfo {
            amount: U256::zero(),
            reward_debt: U256::zero(),
        })
    }

    fn only_owner(&self) {
        let caller = self.env().caller();
        let owner = self.get_owner();
        if caller != owner {
            self.env().revert(FarmingError::Unauthorized);
        }
    }
}

impl StakePoolRegistry {
    /// Unwrap a math result, reverting the whole call on error
    fn checked<T>(&self, result: Result<T, FarmingError>) -> T {
        match result {
            Ok(value) => value,
            Err(error) => self.env().revert(error),
        }
    }
}
