use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};
use shared::AssetAccount;

#[cw_serde]
pub struct Delegation {
    /// Account that created the delegation; the only party able to reactivate it
    pub owner: Addr,
    /// Identity that must sign every transfer request
    pub transfer_authority: Addr,
    /// Identity that must sign deactivation requests
    pub deactivate_authority: Addr,
    /// Whether transfers are currently permitted
    pub active: bool,
    /// Destinations a transfer may target, fixed at creation
    pub allowed_destinations: Vec<AssetAccount>,
    /// Creation timestamp
    pub created_at: u64,
}

#[cw_serde]
pub struct Config {
    /// Maximum number of whitelisted destinations per delegation
    pub max_destinations: usize,
}

/// Configuration storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Delegations indexed by transfer authority
pub const DELEGATIONS: Map<&Addr, Delegation> = Map::new("delegations");

/// Delegations by owner (for queries)
/// Key: (owner, transfer_authority)
pub const OWNER_DELEGATIONS: Map<(&Addr, &Addr), ()> = Map::new("owner_delegations");
