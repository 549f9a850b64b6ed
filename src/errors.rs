//! Error definitions shared by the token contracts
use odra::prelude::*;

/// Custom errors for the CEP-18 token contracts
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,

    /// Transfer or burn would underflow the holder's balance
    InsufficientBalance = 101,

    /// Caller is not the token owner (mint/burn/ownership are owner-only)
    NotOwner = 102,

    /// Mint would overflow the total supply
    SupplyOverflow = 103,
}
