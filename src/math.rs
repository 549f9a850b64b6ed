//! Fixed-point reward accounting for the farm
//!
//! Accumulators are stored as integers scaled by [`ACC_REWARD_PRECISION`].
//! Every division truncates toward zero, so a participant can lose at most
//! one unit per settlement and the sum paid out never exceeds what was minted.
use odra::casper_types::U256;
use crate::farming::errors::FarmingError;

/// Scale of `acc_reward_per_share`
pub const ACC_REWARD_PRECISION: u128 = 1_000_000_000_000;

/// Dev cut is `reward / DEV_CUT_DIVISOR` (10%), minted on top of the stakers' share
pub const DEV_CUT_DIVISOR: u64 = 10;

/// Checked U256 operations reporting overflow as [`FarmingError::ArithmeticOverflow`]
pub struct SafeMath;

impl SafeMath {
    pub fn add(a: U256, b: U256) -> Result<U256, FarmingError> {
        a.checked_add(b).ok_or(FarmingError::ArithmeticOverflow)
    }

    pub fn sub(a: U256, b: U256) -> Result<U256, FarmingError> {
        a.checked_sub(b).ok_or(FarmingError::ArithmeticOverflow)
    }

    pub fn mul(a: U256, b: U256) -> Result<U256, FarmingError> {
        a.checked_mul(b).ok_or(FarmingError::ArithmeticOverflow)
    }

    /// Truncating division; a zero divisor is treated as overflow
    pub fn div(a: U256, b: U256) -> Result<U256, FarmingError> {
        a.checked_div(b).ok_or(FarmingError::ArithmeticOverflow)
    }
}

/// Reward formulas shared by the registry and the bonus pool
pub struct RewardMath;

impl RewardMath {
    /// Emission owed to one pool for `blocks` elapsed blocks:
    /// `blocks * multiplier * reward_per_block * weight / total_weight`
    pub fn emission_for(
        blocks: u64,
        multiplier: u64,
        reward_per_block: U256,
        weight: u64,
        total_weight: u64,
    ) -> Result<U256, FarmingError> {
        let scaled_blocks = SafeMath::mul(U256::from(blocks), U256::from(multiplier))?;
        let gross = SafeMath::mul(scaled_blocks, reward_per_block)?;
        SafeMath::div(
            SafeMath::mul(gross, U256::from(weight))?,
            U256::from(total_weight),
        )
    }

    /// Increase of `acc_reward_per_share` when `reward` is spread over `total_staked`
    pub fn acc_increment(reward: U256, total_staked: U256) -> Result<U256, FarmingError> {
        SafeMath::div(
            SafeMath::mul(reward, U256::from(ACC_REWARD_PRECISION))?,
            total_staked,
        )
    }

    /// `amount * acc / PRECISION`; this is also the reward debt of a stake
    pub fn accrued(amount: U256, acc_reward_per_share: U256) -> Result<U256, FarmingError> {
        SafeMath::div(
            SafeMath::mul(amount, acc_reward_per_share)?,
            U256::from(ACC_REWARD_PRECISION),
        )
    }

    /// Reward earned by a stake since its debt was last recorded
    pub fn pending(
        amount: U256,
        acc_reward_per_share: U256,
        reward_debt: U256,
    ) -> Result<U256, FarmingError> {
        SafeMath::sub(Self::accrued(amount, acc_reward_per_share)?, reward_debt)
    }

    pub fn dev_cut(reward: U256) -> U256 {
        reward / U256::from(DEV_CUT_DIVISOR)
    }
}
