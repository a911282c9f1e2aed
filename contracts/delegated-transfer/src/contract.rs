use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Api, Binary, Deps, DepsMut, Env, MessageInfo, Order,
    QuerierWrapper, Response, StdResult, Uint128,
};
use cw2::set_contract_version;
use shared::{transfer_from_msg, AllowanceResponse, AssetAccount, TokenQueryMsg};

use crate::error::ContractError;
use crate::msg::{
    AssetAccountInput, CheckTransferResponse, ConfigResponse, DelegationResponse,
    DelegationsResponse, ExecuteMsg, HasDelegationResponse, InstantiateMsg, QueryMsg,
};
use crate::state::{Config, Delegation, CONFIG, DELEGATIONS, OWNER_DELEGATIONS};

const CONTRACT_NAME: &str = "crates.io:delegated-transfer";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_MAX_DESTINATIONS: usize = 10;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        max_destinations: msg.max_destinations.unwrap_or(DEFAULT_MAX_DESTINATIONS),
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("max_destinations", config.max_destinations.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateDelegation {
            transfer_authority,
            deactivate_authority,
            allowed_destinations,
        } => execute_create_delegation(
            deps,
            env,
            info,
            transfer_authority,
            deactivate_authority,
            allowed_destinations,
        ),
        ExecuteMsg::Deactivate { transfer_authority } => {
            execute_deactivate(deps, info, transfer_authority)
        }
        ExecuteMsg::Activate { transfer_authority } => {
            execute_activate(deps, info, transfer_authority)
        }
        ExecuteMsg::Transfer {
            transfer_authority,
            source,
            destination,
            amount,
        } => execute_transfer(deps, env, info, transfer_authority, source, destination, amount),
    }
}

pub fn execute_create_delegation(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    transfer_authority: String,
    deactivate_authority: String,
    allowed_destinations: Vec<AssetAccountInput>,
) -> Result<Response, ContractError> {
    let transfer_addr = deps.api.addr_validate(&transfer_authority)?;
    let deactivate_addr = deps.api.addr_validate(&deactivate_authority)?;

    // The three roles must be held by three distinct identities
    if transfer_addr == deactivate_addr
        || deactivate_addr == info.sender
        || transfer_addr == info.sender
    {
        return Err(ContractError::InvalidAuthorityConfiguration {});
    }

    let config = CONFIG.load(deps.storage)?;
    if allowed_destinations.len() > config.max_destinations {
        return Err(ContractError::WhitelistTooLong {
            max: config.max_destinations,
        });
    }

    let mut destinations: Vec<AssetAccount> = Vec::with_capacity(allowed_destinations.len());
    for input in &allowed_destinations {
        let destination = validate_asset_account(deps.api, input)?;
        if destinations.contains(&destination) {
            return Err(ContractError::DuplicateDestination {});
        }
        destinations.push(destination);
    }

    if DELEGATIONS.has(deps.storage, &transfer_addr) {
        return Err(ContractError::DelegationAlreadyExists {});
    }

    let delegation = Delegation {
        owner: info.sender.clone(),
        transfer_authority: transfer_addr.clone(),
        deactivate_authority: deactivate_addr.clone(),
        active: true,
        allowed_destinations: destinations,
        created_at: env.block.time.seconds(),
    };

    DELEGATIONS.save(deps.storage, &transfer_addr, &delegation)?;
    OWNER_DELEGATIONS.save(deps.storage, (&info.sender, &transfer_addr), &())?;

    Ok(Response::new()
        .add_attribute("method", "create_delegation")
        .add_attribute("owner", info.sender)
        .add_attribute("transfer_authority", transfer_addr)
        .add_attribute("deactivate_authority", deactivate_addr)
        .add_attribute(
            "destinations",
            delegation.allowed_destinations.len().to_string(),
        ))
}

pub fn execute_deactivate(
    deps: DepsMut,
    info: MessageInfo,
    transfer_authority: String,
) -> Result<Response, ContractError> {
    let authority_addr = deps.api.addr_validate(&transfer_authority)?;

    let mut delegation = DELEGATIONS
        .may_load(deps.storage, &authority_addr)?
        .ok_or(ContractError::DelegationNotFound {})?;

    // Freezing is the deactivation authority's capability alone; the
    // owner cannot deactivate
    if info.sender != delegation.deactivate_authority {
        return Err(ContractError::Unauthorized {});
    }

    // Deactivating an already-inactive delegation is a no-op success
    delegation.active = false;
    DELEGATIONS.save(deps.storage, &authority_addr, &delegation)?;

    Ok(Response::new()
        .add_attribute("method", "deactivate")
        .add_attribute("transfer_authority", authority_addr))
}

pub fn execute_activate(
    deps: DepsMut,
    info: MessageInfo,
    transfer_authority: String,
) -> Result<Response, ContractError> {
    let authority_addr = deps.api.addr_validate(&transfer_authority)?;

    let mut delegation = DELEGATIONS
        .may_load(deps.storage, &authority_addr)?
        .ok_or(ContractError::DelegationNotFound {})?;

    // Only the owner can reactivate; the deactivation authority cannot
    // undo its own freeze
    if info.sender != delegation.owner {
        return Err(ContractError::Unauthorized {});
    }

    delegation.active = true;
    DELEGATIONS.save(deps.storage, &authority_addr, &delegation)?;

    Ok(Response::new()
        .add_attribute("method", "activate")
        .add_attribute("transfer_authority", authority_addr))
}

pub fn execute_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    transfer_authority: String,
    source: AssetAccountInput,
    destination: AssetAccountInput,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let authority_addr = deps.api.addr_validate(&transfer_authority)?;

    let delegation = DELEGATIONS
        .may_load(deps.storage, &authority_addr)?
        .ok_or(ContractError::DelegationNotFound {})?;

    // Authority is checked before any state or data check
    if info.sender != delegation.transfer_authority {
        return Err(ContractError::Unauthorized {});
    }

    if !delegation.active {
        return Err(ContractError::DelegationInactive {});
    }

    let source = validate_asset_account(deps.api, &source)?;
    let destination = validate_asset_account(deps.api, &destination)?;

    if !delegation.allowed_destinations.contains(&destination) {
        return Err(ContractError::DestinationNotWhitelisted {});
    }

    if !source.same_token(&destination) {
        return Err(ContractError::AssetTypeMismatch {});
    }

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    // The ledger enforces the allowance again when the directive executes
    let allowance = query_allowance(&deps.querier, &source, &env.contract.address)?;
    if allowance < amount {
        return Err(ContractError::InsufficientAllowance {
            required: amount,
            available: allowance,
        });
    }

    let transfer_msg = transfer_from_msg(&source, &destination, amount)?;

    Ok(Response::new()
        .add_message(transfer_msg)
        .add_attribute("method", "transfer")
        .add_attribute("transfer_authority", authority_addr)
        .add_attribute("token", source.token)
        .add_attribute("from", source.holder)
        .add_attribute("to", destination.holder)
        .add_attribute("amount", amount.to_string()))
}

fn validate_asset_account(api: &dyn Api, input: &AssetAccountInput) -> StdResult<AssetAccount> {
    Ok(AssetAccount {
        token: api.addr_validate(&input.token)?,
        holder: api.addr_validate(&input.holder)?,
    })
}

fn query_allowance(
    querier: &QuerierWrapper,
    source: &AssetAccount,
    spender: &Addr,
) -> StdResult<Uint128> {
    let res: AllowanceResponse = querier.query_wasm_smart(
        source.token.to_string(),
        &TokenQueryMsg::Allowance {
            owner: source.holder.to_string(),
            spender: spender.to_string(),
        },
    )?;
    Ok(res.allowance)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::GetDelegation { transfer_authority } => {
            to_json_binary(&query_delegation(deps, transfer_authority)?)
        }
        QueryMsg::HasDelegation { transfer_authority } => {
            to_json_binary(&query_has_delegation(deps, transfer_authority)?)
        }
        QueryMsg::CheckTransfer {
            transfer_authority,
            source,
            destination,
            amount,
        } => to_json_binary(&query_check_transfer(
            deps,
            env,
            transfer_authority,
            source,
            destination,
            amount,
        )?),
        QueryMsg::ListDelegationsByOwner { owner, limit } => {
            to_json_binary(&query_delegations_by_owner(deps, owner, limit)?)
        }
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        max_destinations: config.max_destinations,
    })
}

fn query_delegation(deps: Deps, transfer_authority: String) -> StdResult<DelegationResponse> {
    let authority_addr = deps.api.addr_validate(&transfer_authority)?;
    let delegation = DELEGATIONS.load(deps.storage, &authority_addr)?;
    Ok(delegation_to_response(delegation))
}

fn query_has_delegation(deps: Deps, transfer_authority: String) -> StdResult<HasDelegationResponse> {
    let authority_addr = deps.api.addr_validate(&transfer_authority)?;
    Ok(HasDelegationResponse {
        exists: DELEGATIONS.has(deps.storage, &authority_addr),
    })
}

fn query_check_transfer(
    deps: Deps,
    env: Env,
    transfer_authority: String,
    source: AssetAccountInput,
    destination: AssetAccountInput,
    amount: Uint128,
) -> StdResult<CheckTransferResponse> {
    let authority_addr = deps.api.addr_validate(&transfer_authority)?;

    let delegation = match DELEGATIONS.may_load(deps.storage, &authority_addr)? {
        Some(delegation) => delegation,
        None => {
            return Ok(CheckTransferResponse {
                allowed: false,
                reason: "No delegation for this transfer authority".to_string(),
            })
        }
    };

    if !delegation.active {
        return Ok(CheckTransferResponse {
            allowed: false,
            reason: "Delegation is deactivated".to_string(),
        });
    }

    let source = validate_asset_account(deps.api, &source)?;
    let destination = validate_asset_account(deps.api, &destination)?;

    if !delegation.allowed_destinations.contains(&destination) {
        return Ok(CheckTransferResponse {
            allowed: false,
            reason: "Destination is not on the whitelist".to_string(),
        });
    }

    if !source.same_token(&destination) {
        return Ok(CheckTransferResponse {
            allowed: false,
            reason: "Source and destination hold different tokens".to_string(),
        });
    }

    if amount.is_zero() {
        return Ok(CheckTransferResponse {
            allowed: false,
            reason: "Transfer amount must be positive".to_string(),
        });
    }

    let allowance = query_allowance(&deps.querier, &source, &env.contract.address)?;
    if allowance < amount {
        return Ok(CheckTransferResponse {
            allowed: false,
            reason: format!(
                "Delegated allowance {} is less than transfer amount {}",
                allowance, amount
            ),
        });
    }

    Ok(CheckTransferResponse {
        allowed: true,
        reason: "Transfer checks passed; signer identity is checked at execution".to_string(),
    })
}

fn query_delegations_by_owner(
    deps: Deps,
    owner: String,
    limit: Option<u32>,
) -> StdResult<DelegationsResponse> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    let limit = limit.unwrap_or(10) as usize;

    let delegations: Vec<DelegationResponse> = OWNER_DELEGATIONS
        .prefix(&owner_addr)
        .range(deps.storage, None, None, Order::Ascending)
        .take(limit)
        .filter_map(|item| {
            let (transfer_authority, _) = item.ok()?;
            let delegation = DELEGATIONS.load(deps.storage, &transfer_authority).ok()?;
            Some(delegation_to_response(delegation))
        })
        .collect();

    Ok(DelegationsResponse { delegations })
}

fn delegation_to_response(delegation: Delegation) -> DelegationResponse {
    DelegationResponse {
        owner: delegation.owner,
        transfer_authority: delegation.transfer_authority,
        deactivate_authority: delegation.deactivate_authority,
        active: delegation.active,
        allowed_destinations: delegation.allowed_destinations,
        created_at: delegation.created_at,
    }
}
