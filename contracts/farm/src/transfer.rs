use harvest_shared::{AssetTokenClient, RewardTokenClient};
use soroban_sdk::{log, Address, Env};

use crate::FarmError;

// Token collaborator calls. A rejected call fails the whole invocation.

/// Move `amount` of a pool asset from `from` into the farm's custody.
pub fn pull_asset(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), FarmError> {
    let farm = env.current_contract_address();
    match AssetTokenClient::new(env, asset).try_transfer(from, &farm, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "Asset pull of {} from {} rejected", amount, from);
            Err(FarmError::ExternalTransferFailed)
        }
    }
}

/// Move `amount` of a pool asset out of the farm's custody to `to`.
pub fn push_asset(env: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), FarmError> {
    let farm = env.current_contract_address();
    match AssetTokenClient::new(env, asset).try_transfer(&farm, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "Asset push of {} to {} rejected", amount, to);
            Err(FarmError::ExternalTransferFailed)
        }
    }
}

/// Pay out reward tokens already minted into the farm's custody.
pub fn pay_reward(env: &Env, reward_token: &Address, to: &Address, amount: i128) -> Result<(), FarmError> {
    let farm = env.current_contract_address();
    match RewardTokenClient::new(env, reward_token).try_transfer(&farm, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "Reward payout of {} to {} rejected", amount, to);
            Err(FarmError::ExternalTransferFailed)
        }
    }
}

pub fn mint_reward(env: &Env, reward_token: &Address, to: &Address, amount: i128) -> Result<(), FarmError> {
    match RewardTokenClient::new(env, reward_token).try_mint(to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "Reward mint of {} to {} rejected", amount, to);
            Err(FarmError::ExternalTransferFailed)
        }
    }
}
