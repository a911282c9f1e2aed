// Shared types for the delegated-transfer contracts on CosmWasm

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, StdResult, Uint128, WasmMsg};

/// A token balance reference: a holder's account on a cw20-style token
/// contract. The token contract address identifies the asset type.
#[cw_serde]
pub struct AssetAccount {
    pub token: Addr,
    pub holder: Addr,
}

impl AssetAccount {
    /// Two references denote the same asset type when they live on the
    /// same token contract.
    pub fn same_token(&self, other: &AssetAccount) -> bool {
        self.token == other.token
    }
}

/// Execute interface of the external token ledger, limited to the subset
/// the engine emits (cw20-style delegated transfer).
#[cw_serde]
pub enum TokenExecuteMsg {
    /// Move `amount` from `owner` to `recipient`, spending the caller's
    /// standing allowance on `owner`'s balance
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
}

/// Query interface of the external token ledger, limited to the subset
/// the engine consumes.
#[cw_serde]
pub enum TokenQueryMsg {
    /// Standing allowance granted by `owner` to `spender`
    Allowance { owner: String, spender: String },
}

#[cw_serde]
pub struct AllowanceResponse {
    pub allowance: Uint128,
}

// Common helper functions

/// Build the directive moving `amount` from `source` to the destination
/// holder, executed against the source token ledger with the sending
/// contract as delegate.
pub fn transfer_from_msg(
    source: &AssetAccount,
    destination: &AssetAccount,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: source.token.to_string(),
        msg: to_json_binary(&TokenExecuteMsg::TransferFrom {
            owner: source.holder.to_string(),
            recipient: destination.holder.to_string(),
            amount,
        })?,
        funds: vec![],
    }))
}
