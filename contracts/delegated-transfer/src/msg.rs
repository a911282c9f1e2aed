use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use shared::AssetAccount;

#[cw_serde]
pub struct InstantiateMsg {
    /// Maximum whitelist size per delegation (defaults to 10)
    pub max_destinations: Option<usize>,
}

/// Asset-holding reference as supplied by a caller, validated on receipt
#[cw_serde]
pub struct AssetAccountInput {
    pub token: String,
    pub holder: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Create a delegation; the caller becomes its owner
    CreateDelegation {
        transfer_authority: String,
        deactivate_authority: String,
        allowed_destinations: Vec<AssetAccountInput>,
    },
    /// Freeze transfers (deactivation authority only)
    Deactivate { transfer_authority: String },
    /// Unfreeze transfers (owner only)
    Activate { transfer_authority: String },
    /// Execute a delegated transfer (transfer authority only)
    Transfer {
        transfer_authority: String,
        source: AssetAccountInput,
        destination: AssetAccountInput,
        amount: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Get a delegation by its transfer authority
    #[returns(DelegationResponse)]
    GetDelegation { transfer_authority: String },

    /// Check if a delegation exists for a transfer authority
    #[returns(HasDelegationResponse)]
    HasDelegation { transfer_authority: String },

    /// Dry-run the transfer policy; signer identity is not checked
    #[returns(CheckTransferResponse)]
    CheckTransfer {
        transfer_authority: String,
        source: AssetAccountInput,
        destination: AssetAccountInput,
        amount: Uint128,
    },

    /// Get all delegations created by an owner
    #[returns(DelegationsResponse)]
    ListDelegationsByOwner {
        owner: String,
        limit: Option<u32>,
    },
}

// Response types

#[cw_serde]
pub struct ConfigResponse {
    pub max_destinations: usize,
}

#[cw_serde]
pub struct DelegationResponse {
    pub owner: Addr,
    pub transfer_authority: Addr,
    pub deactivate_authority: Addr,
    pub active: bool,
    pub allowed_destinations: Vec<AssetAccount>,
    pub created_at: u64,
}

#[cw_serde]
pub struct HasDelegationResponse {
    pub exists: bool,
}

#[cw_serde]
pub struct CheckTransferResponse {
    pub allowed: bool,
    pub reason: String,
}

#[cw_serde]
pub struct DelegationsResponse {
    pub delegations: Vec<DelegationResponse>,
}
