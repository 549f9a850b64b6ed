//! CEP-18 ledger shared by every token in the farm
//!
//! Concrete tokens embed [`Cep18Ledger`] and decide who may mint or burn.
//! Arbitrary staked assets are reached through [`Cep18Token`].
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{Transfer, Approval};
use crate::errors::TokenError;

#[odra::odra_type]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// CEP-18 ledger, embedded as a submodule by the concrete tokens
#[odra::module]
pub struct Cep18Ledger {
    metadata: Var<TokenMetadata>,
    total_supply: Var<U256>,
    /// owner -> balance
    balances: Mapping<Address, U256>,
    /// (owner, spender) -> remaining allowance
    allowances: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl Cep18Ledger {
    /// Set token metadata; called from the embedding token's `init`
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        self.metadata.set(TokenMetadata { name, symbol, decimals });
        self.total_supply.set(U256::zero());
    }

    pub fn name(&self) -> String {
        self.metadata.get().map(|metadata| metadata.name).unwrap_or_default()
    }

    pub fn symbol(&self) -> String {
        self.metadata.get().map(|metadata| metadata.symbol).unwrap_or_default()
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.get().map(|metadata| metadata.decimals).unwrap_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.move_balance(Some(caller), Some(to), amount);
        true
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.set_allowance(caller, spender, amount);
        true
    }

    /// Move `amount` out of `from`, spending the caller's allowance
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let spender = self.env().caller();
        let remaining = self
            .allowance(from, spender)
            .checked_sub(amount)
            .unwrap_or_revert_with(&self.env(), TokenError::InsufficientAllowance);
        self.set_allowance(from, spender, remaining);
        self.move_balance(Some(from), Some(to), amount);
        true
    }

    /// Credit `amount` to `to`. Authorization is the embedding token's job.
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.move_balance(None, Some(to), amount);
    }

    /// Debit `amount` from `from`. Authorization is the embedding token's job.
    pub fn burn(&mut self, from: Address, amount: U256) {
        self.move_balance(Some(from), None, amount);
    }

    /// Debit `from` and credit `to`. A missing side is the supply itself,
    /// so `None -> to` mints and `from -> None` burns.
    fn move_balance(&mut self, from: Option<Address>, to: Option<Address>, amount: U256) {
        match from {
            Some(holder) => {
                let balance = self
                    .balance_of(holder)
                    .checked_sub(amount)
                    .unwrap_or_revert_with(&self.env(), TokenError::InsufficientBalance);
                self.balances.set(&holder, balance);
            }
            None => {
                let supply = self
                    .total_supply()
                    .checked_add(amount)
                    .unwrap_or_revert_with(&self.env(), TokenError::SupplyOverflow);
                self.total_supply.set(supply);
            }
        }

        // Both credits are bounded by the supply checked above
        match to {
            Some(recipient) => {
                let balance = self.balance_of(recipient) + amount;
                self.balances.set(&recipient, balance);
            }
            None => {
                let supply = self.total_supply() - amount;
                self.total_supply.set(supply);
            }
        }

        let ledger = Address::from(self.env().self_address());
        self.env().emit_event(Transfer {
            from: from.unwrap_or(ledger),
            to: to.unwrap_or(ledger),
            value: amount,
        });
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);
        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }
}

/// Any CEP-18 asset staked into the farm
#[odra::external_contract]
pub trait Cep18Token {
    fn balance_of(&self, owner: Address) -> U256;
    fn transfer(&mut self, to: Address, amount: U256) -> bool;
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;
    fn approve(&mut self, spender: Address, amount: U256) -> bool;
    fn allowance(&self, owner: Address, spender: Address) -> U256;
    fn total_supply(&self) -> U256;
}

/// Owner-only supply surface of the farm tokens, as seen by the registry
#[odra::external_contract]
pub trait MintableToken {
    fn mint(&mut self, to: Address, amount: U256);

    fn burn(&mut self, from: Address, amount: U256);
}
