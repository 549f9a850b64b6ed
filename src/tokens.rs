//! Concrete token contracts used by the farm
//! Each token is a separate type so Odra can deploy them independently.
//! All of them keep balances in an embedded [`Cep18Ledger`].
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::OwnershipTransferred;
use crate::errors::TokenError;
use crate::token::Cep18Ledger;

/// Reward token - emitted by the pool registry
///
/// `mint` is restricted to the owner. At bring-up the deployer hands
/// ownership to the registry, which from then on is the only minter.
#[odra::module]
pub struct RewardToken {
    ledger: SubModule<Cep18Ledger>,
    owner: Var<Address>,
}

#[odra::module]
impl RewardToken {
    pub fn init(&mut self, name: String, symbol: String) {
        self.ledger.init(name, symbol, 18);
        let caller = self.env().caller();
        self.owner.set(caller);
    }

    pub fn name(&self) -> String { self.ledger.name() }
    pub fn symbol(&self) -> String { self.ledger.symbol() }
    pub fn decimals(&self) -> u8 { self.ledger.decimals() }
    pub fn total_supply(&self) -> U256 { self.ledger.total_supply() }
    pub fn balance_of(&self, owner: Address) -> U256 { self.ledger.balance_of(owner) }
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 { self.ledger.allowance(owner, spender) }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        self.ledger.transfer(to, amount)
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        self.ledger.approve(spender, amount)
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        self.ledger.transfer_from(from, to, amount)
    }

    /// Mint new reward tokens (owner only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.only_owner();
        self.ledger.mint(to, amount);
    }

    pub fn get_owner(&self) -> Address {
        self.owner.get_or_revert_with(TokenError::NotOwner)
    }

    /// Hand ownership, and with it the mint right, to `new_owner`
    pub fn transfer_ownership(&mut self, new_owner: Address) {
        let previous_owner = self.only_owner();
        self.owner.set(new_owner);
        self.env().emit_event(OwnershipTransferred { previous_owner, new_owner });
    }

    fn only_owner(&self) -> Address {
        let owner = self.get_owner();
        if self.env().caller() != owner {
            self.env().revert(TokenError::NotOwner);
        }
        owner
    }
}

/// Wrapped stake token - 1:1 receipt for reward tokens staked back into the registry
///
/// Minted on `enter_staking` and burned on `leave_staking`; both are
/// owner-only and the registry becomes the owner at bring-up.
#[odra::module]
pub struct WrappedStakeToken {
    ledger: SubModule<Cep18Ledger>,
    owner: Var<Address>,
    /// The reward token this receipt is backed by
    underlying: Var<Address>,
}

#[odra::module]
impl WrappedStakeToken {
    pub fn init(&mut self, underlying: Address) {
        self.ledger.init(String::from("Wrapped Stake Token"), String::from("wSTK"), 18);
        let caller = self.env().caller();
        self.owner.set(caller);
        self.underlying.set(underlying);
    }

    pub fn name(&self) -> String { self.ledger.name() }
    pub fn symbol(&self) -> String { self.ledger.symbol() }
    pub fn decimals(&self) -> u8 { self.ledger.decimals() }
    pub fn total_supply(&self) -> U256 { self.ledger.total_supply() }
    pub fn balance_of(&self, owner: Address) -> U256 { self.ledger.balance_of(owner) }
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 { self.ledger.allowance(owner, spender) }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        self.ledger.transfer(to, amount)
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        self.ledger.approve(spender, amount)
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        self.ledger.transfer_from(from, to, amount)
    }

    pub fn mint(&mut self, to: Address, amount: U256) {
        self.only_owner();
        self.ledger.mint(to, amount);
    }

    pub fn burn(&mut self, from: Address, amount: U256) {
        self.only_owner();
        self.ledger.burn(from, amount);
    }

    pub fn get_underlying(&self) -> Address {
        self.underlying.get_or_revert_with(TokenError::NotOwner)
    }

    pub fn get_owner(&self) -> Address {
        self.owner.get_or_revert_with(TokenError::NotOwner)
    }

    pub fn transfer_ownership(&mut self, new_owner: Address) {
        let previous_owner = self.only_owner();
        self.owner.set(new_owner);
        self.env().emit_event(OwnershipTransferred { previous_owner, new_owner });
    }

    fn only_owner(&self) -> Address {
        let owner = self.get_owner();
        if self.env().caller() != owner {
            self.env().revert(TokenError::NotOwner);
        }
        owner
    }
}

/// Stake token - plain CEP-18 asset with a fixed supply, staked into pools
#[odra::module]
pub struct StakeToken {
    ledger: SubModule<Cep18Ledger>,
}

#[odra::module]
impl StakeToken {
    /// Initialize and mint the whole supply to the deployer
    pub fn init(&mut self, name: String, symbol: String, initial_supply: U256) {
        self.ledger.init(name, symbol, 18);
        let deployer = self.env().caller();
        self.ledger.mint(deployer, initial_supply);
    }

    pub fn name(&self) -> String { self.ledger.name() }
    pub fn symbol(&self) -> String { self.ledger.symbol() }
    pub fn decimals(&self) -> u8 { self.ledger.decimals() }
    pub fn total_supply(&self) -> U256 { self.ledger.total_supply() }
    pub fn balance_of(&self, owner: Address) -> U256 { self.ledger.balance_of(owner) }
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 { self.ledger.allowance(owner, spender) }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        self.ledger.transfer(to, amount)
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        self.ledger.approve(spender, amount)
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        self.ledger.transfer_from(from, to, amount)
    }
}
