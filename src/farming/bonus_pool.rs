//! Bonus Reward Pool - routes one registry stake's reward to a receiver
//!
//! The bonus pool stakes a pre-funded amount into one registry pool as an
//! ordinary participant, through the registry's public `deposit` /
//! `withdraw` path. Whatever reward that stake earns is forwarded in full to
//! `receiver` on every harvest, so the pool's weight math is untouched.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::FarmingError;
use super::events::*;
use super::pool_registry::{projected_acc_reward_per_share, StakePoolRegistryContractRef};
use crate::math::RewardMath;
use crate::token::Cep18TokenContractRef;

/// Stake registered by `start_farming`
#[odra::odra_type]
pub struct FarmInfo {
    pub pool_id: u32,
    pub asset: Address,
    pub stake_amount: U256,
}

/// Bonus Reward Pool contract
#[odra::module]
pub struct BonusRewardPool {
    /// Stake pool registry address
    registry: Var<Address>,
    /// Reward token address
    reward_token: Var<Address>,
    /// Deployer; may rotate the admin
    owner: Var<Address>,
    /// Starts, harvests and rescues the stake
    admin: Var<Address>,
    /// Beneficiary of every harvest
    receiver: Var<Address>,
    /// Set once farming has started
    farm: Var<FarmInfo>,
}

#[odra::module]
impl BonusRewardPool {
    pub fn init(&mut self, registry: Address, reward_token: Address, admin: Address, receiver: Address) {
        let caller = self.env().caller();
        self.registry.set(registry);
        self.reward_token.set(reward_token);
        self.owner.set(caller);
        self.admin.set(admin);
        self.receiver.set(receiver);
    }

    /// Stake `stake_amount` of `asset`, already held by this contract, into `pool_id`.
    /// Can only happen once.
    pub fn start_farming(&mut self, pool_id: u32, asset: Address, stake_amount: U256) {
        self.only_admin();
        if self.farm.get().is_some() {
            self.env().revert(FarmingError::AlreadyStarted);
        }

        let registry_address = self.registry_address();
        Cep18TokenContractRef::new(self.env(), asset).approve(registry_address, stake_amount);
        self.registry().deposit(pool_id, stake_amount);

        self.farm.set(FarmInfo {
            pool_id,
            asset,
            stake_amount,
        });
        self.env().emit_event(FarmingStarted {
            pool_id,
            asset,
            amount: stake_amount,
        });
    }

    /// Reward the next harvest of `pool_id` would forward, derived from the
    /// registry's current pool record rather than any stored value
    pub fn pending_reward(&self, pool_id: u32) -> U256 {
        let registry = self.registry();
        let pool = registry
            .get_pool_info(pool_id)
            .unwrap_or_revert_with(&self.env(), FarmingError::PoolNotFound);
        let schedule = registry.get_emission_schedule();
        let stake = registry.get_user_info(pool_id, self.self_address());

        let acc = self.checked(projected_acc_reward_per_share(&pool, &schedule, registry.current_block()));
        self.checked(RewardMath::pending(stake.amount, acc, stake.reward_debt))
    }

    /// Realize the pending reward of `pool_id` and forward the whole balance to the receiver
    pub fn harvest(&mut self, pool_id: u32) {
        self.only_admin();
        self.registry().withdraw(pool_id, U256::zero());

        let self_address = self.self_address();
        let receiver = self.get_receiver();
        let mut reward_token = Cep18TokenContractRef::new(self.env(), self.reward_token_address());
        let amount = reward_token.balance_of(self_address);
        if !amount.is_zero() {
            reward_token.transfer(receiver, amount);
        }

        self.env().emit_event(Harvested {
            pool_id,
            receiver,
            amount,
        });
    }

    /// Pull the stake out of `pool_id` without reward and send it to the admin
    pub fn emergency_withdraw(&mut self, pool_id: u32) {
        let admin = self.only_admin();
        let mut registry = self.registry();
        let pool = registry
            .get_pool_info(pool_id)
            .unwrap_or_revert_with(&self.env(), FarmingError::PoolNotFound);
        let stake = registry.get_user_info(pool_id, self.self_address());

        registry.emergency_withdraw(pool_id);
        if !stake.amount.is_zero() {
            Cep18TokenContractRef::new(self.env(), pool.asset).transfer(admin, stake.amount);
        }

        self.env().emit_event(StakeRecovered {
            pool_id,
            admin,
            amount: stake.amount,
        });
    }

    pub fn set_receiver(&mut self, new_receiver: Address) {
        self.only_admin();
        let old_receiver = self.get_receiver();
        self.receiver.set(new_receiver);
        self.env().emit_event(ReceiverUpdated {
            old_receiver,
            new_receiver,
        });
    }

    pub fn set_admin(&mut self, new_admin: Address) {
        self.only_owner();
        let old_admin = self.get_admin();
        self.admin.set(new_admin);
        self.env().emit_event(AdminUpdated { old_admin, new_admin });
    }

    // ========================================
    // View Functions
    // ========================================

    pub fn get_admin(&self) -> Address {
        self.admin.get_or_revert_with(FarmingError::Unauthorized)
    }

    pub fn get_owner(&self) -> Address {
        self.owner.get_or_revert_with(FarmingError::Unauthorized)
    }

    pub fn get_receiver(&self) -> Address {
        self.receiver.get_or_revert_with(FarmingError::InvalidConfiguration)
    }

    pub fn is_started(&self) -> bool {
        self.farm.get().is_some()
    }

    pub fn get_farm_info(&self) -> Option<FarmInfo> {
        self.farm.get()
    }

    fn registry_address(&self) -> Address {
        self.registry.get_or_revert_with(FarmingError::InvalidConfiguration)
    }

    fn registry(&self) -> StakePoolRegistryContractRef {
        StakePoolRegistryContractRef::new(self.env(), self.registry_address())
    }

    fn reward_token_address(&self) -> Address {
        self.reward_token.get_or_revert_with(FarmingError::InvalidConfiguration)
    }

    fn self_address(&self) -> Address {
        Address::from(self.env().self_address())
    }

    fn only_admin(&self) -> Address {
        let caller = self.env().caller();
        if caller != self.get_admin() {
            self.env().revert(FarmingError::Unauthorized);
        }
        caller
    }

    fn only_owner(&self) {
        let caller = self.env().caller();
        if caller != self.get_owner() {
            self.env().revert(FarmingError::Unauthorized);
        }
    }
}

impl BonusRewardPool {
    fn checked<T>(&self, result: Result<T, FarmingError>) -> T {
        match result {
            Ok(value) => value,
            Err(error) => self.env().revert(error),
        }
    }
}
