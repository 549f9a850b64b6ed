//! CLI tool for deploying and managing the stake farm contracts.

use stake_farm_contracts::farming::bonus_pool::BonusRewardPool;
use stake_farm_contracts::farming::pool_registry::StakePoolRegistry;
use stake_farm_contracts::tokens::{RewardToken, WrappedStakeToken};
use odra::casper_types::U256;
use odra::prelude::{Address, Addressable};
use odra::host::HostEnv;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Reward emitted per block across all pools (18 decimals)
const REWARD_PER_BLOCK: u64 = 10_000_000_000_000_000;
/// Block time in milliseconds that counts as one emission block
const BLOCK_INTERVAL_MS: u64 = 8_000;

/// Deploys the reward token, its wrapped receipt and the pool registry,
/// then hands ownership of both tokens to the registry.
pub struct FarmDeployScript;

impl DeployScript for FarmDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use stake_farm_contracts::farming::pool_registry::StakePoolRegistryInitArgs;
        use stake_farm_contracts::tokens::{RewardTokenInitArgs, WrappedStakeTokenInitArgs};

        let caller = env.caller();
        let mut reward = RewardToken::load_or_deploy(
            &env,
            RewardTokenInitArgs {
                name: String::from("Farm Reward"),
                symbol: String::from("FRM"),
            },
            container,
            300_000_000_000
        )?;
        let reward_address = reward.address().clone();

        let mut wrapped = WrappedStakeToken::load_or_deploy(
            &env,
            WrappedStakeTokenInitArgs {
                underlying: reward_address,
            },
            container,
            300_000_000_000
        )?;

        let registry = StakePoolRegistry::load_or_deploy(
            &env,
            StakePoolRegistryInitArgs {
                reward_token: reward_address,
                wrapped_token: wrapped.address().clone(),
                dev_address: caller,
                reward_per_block: U256::from(REWARD_PER_BLOCK),
                start_block: 0,
                block_interval: BLOCK_INTERVAL_MS,
                staking_pool_weight: 1000,
            },
            container,
            500_000_000_000
        )?;
        let registry_address = registry.address().clone();

        // Skipped on re-runs once the registry already owns the tokens
        if reward.get_owner() == caller {
            env.set_gas(50_000_000_000);
            reward.transfer_ownership(registry_address);
        }
        if wrapped.get_owner() == caller {
            env.set_gas(50_000_000_000);
            wrapped.transfer_ownership(registry_address);
        }

        Ok(())
    }
}

/// Deploys a bonus reward pool against the registry.
/// The deployer becomes owner, admin and receiver.
pub struct BonusPoolDeployScript;

impl DeployScript for BonusPoolDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use stake_farm_contracts::farming::bonus_pool::BonusRewardPoolInitArgs;

        let caller = env.caller();
        let registry = container.contract_ref::<StakePoolRegistry>(env)?;
        let reward = container.contract_ref::<RewardToken>(env)?;

        let _bonus_pool = BonusRewardPool::load_or_deploy(
            &env,
            BonusRewardPoolInitArgs {
                registry: registry.address().clone(),
                reward_token: reward.address().clone(),
                admin: caller,
                receiver: caller,
            },
            container,
            400_000_000_000
        )?;

        Ok(())
    }
}

/// Scenario to register a new stake pool.
pub struct AddPoolScenario;

impl Scenario for AddPoolScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "weight",
                "Share of the emission given to the pool",
                NamedCLType::U64,
            ),
            CommandArg::new(
                "asset",
                "Address of the token staked in the pool",
                NamedCLType::Key,
            ),
            CommandArg::new(
                "with_update",
                "Settle every pool before the total weight changes",
                NamedCLType::Bool,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut registry = container.contract_ref::<StakePoolRegistry>(env)?;
        let weight = args.get_single::<u64>("weight")?;
        let asset = args.get_single::<Address>("asset")?;
        let with_update = args.get_single::<bool>("with_update")?;

        env.set_gas(300_000_000_000);
        let pool_id = registry.try_add_pool(weight, asset, with_update)?;

        println!("Pool {} added with weight {}", pool_id, weight);
        Ok(())
    }
}

impl ScenarioMetadata for AddPoolScenario {
    const NAME: &'static str = "add-pool";
    const DESCRIPTION: &'static str = "Registers a new stake pool in the registry";
}

/// Scenario to change the weight of an existing pool.
pub struct SetPoolWeightScenario;

impl Scenario for SetPoolWeightScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "pool_id",
                "Id of the pool to reweight",
                NamedCLType::U32,
            ),
            CommandArg::new(
                "weight",
                "New share of the emission",
                NamedCLType::U64,
            ),
            CommandArg::new(
                "with_update",
                "Settle every pool before the total weight changes",
                NamedCLType::Bool,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut registry = container.contract_ref::<StakePoolRegistry>(env)?;
        let pool_id = args.get_single::<u32>("pool_id")?;
        let weight = args.get_single::<u64>("weight")?;
        let with_update = args.get_single::<bool>("with_update")?;

        env.set_gas(300_000_000_000);
        registry.try_set_pool_weight(pool_id, weight, with_update)?;

        println!("Pool {} weight set to {}", pool_id, weight);
        Ok(())
    }
}

impl ScenarioMetadata for SetPoolWeightScenario {
    const NAME: &'static str = "set-pool-weight";
    const DESCRIPTION: &'static str = "Changes the emission weight of a stake pool";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the stake farm contracts")
        // Deploy scripts
        .deploy(FarmDeployScript)
        .deploy(BonusPoolDeployScript)
        // Contract references
        .contract::<RewardToken>()
        .contract::<WrappedStakeToken>()
        .contract::<StakePoolRegistry>()
        .contract::<BonusRewardPool>()
        // Scenarios
        .scenario(AddPoolScenario)
        .scenario(SetPoolWeightScenario)
        .build()
        .run();
}
