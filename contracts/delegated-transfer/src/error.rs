use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Owner, transfer and deactivation authorities must be distinct")]
    InvalidAuthorityConfiguration {},

    #[error("A delegation already exists for this transfer authority")]
    DelegationAlreadyExists {},

    #[error("No delegation for this transfer authority")]
    DelegationNotFound {},

    #[error("Delegation is deactivated")]
    DelegationInactive {},

    #[error("Destination is not on the delegation whitelist")]
    DestinationNotWhitelisted {},

    #[error("Source and destination hold different tokens")]
    AssetTypeMismatch {},

    #[error("Delegated allowance {available} is less than transfer amount {required}")]
    InsufficientAllowance {
        required: Uint128,
        available: Uint128,
    },

    #[error("Transfer amount must be positive")]
    InvalidAmount {},

    #[error("Destination whitelist exceeds {max} entries")]
    WhitelistTooLong { max: usize },

    #[error("Duplicate destination in whitelist")]
    DuplicateDestination {},
}
