use harvest_shared::BonusWindow;
use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::FarmError;

// Data Types
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FarmConfig {
    pub admin: Address,
    pub reward_token: Address,
    pub dev_address: Address,
    pub dev_fee_bps: u32, // Extra share of every accrual minted to the dev fund
    pub emission_per_ledger: i128,
    pub start_ledger: u64,
    pub schedule: Vec<BonusWindow>,
    pub migrator: Option<Address>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub asset_token: Address,
    pub weight: u32,
    pub last_accrual_ledger: u64,
    pub acc_reward_per_share: i128, // Scaled by ACC_REWARD_SCALE
    pub total_staked: i128,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stake {
    pub amount: i128,
    pub reward_debt: i128, // Scaled by ACC_REWARD_SCALE
}

// Storage Keys
#[contracttype]
pub enum DataKey {
    Config,
    TotalWeight,
    PoolCount,
    Pool(u32),
    Stake(u32, Address),
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<FarmConfig, FarmError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(FarmError::NotInitialized)
}

pub fn set_config(env: &Env, config: &FarmConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_total_weight(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::TotalWeight).unwrap_or(0)
}

pub fn set_total_weight(env: &Env, total_weight: u64) {
    env.storage().instance().set(&DataKey::TotalWeight, &total_weight);
}

pub fn get_pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::PoolCount).unwrap_or(0)
}

pub fn set_pool_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::PoolCount, &count);
}

/// Pool ids run from 1 to the pool count.
pub fn get_pool(env: &Env, pool_id: u32) -> Result<Pool, FarmError> {
    if pool_id == 0 || pool_id > get_pool_count(env) {
        return Err(FarmError::InvalidPool);
    }
    env.storage()
        .persistent()
        .get(&DataKey::Pool(pool_id))
        .ok_or(FarmError::InvalidPool)
}

pub fn set_pool(env: &Env, pool_id: u32, pool: &Pool) {
    env.storage().persistent().set(&DataKey::Pool(pool_id), pool);
}

pub fn get_stake(env: &Env, pool_id: u32, account: &Address) -> Stake {
    env.storage()
        .persistent()
        .get(&DataKey::Stake(pool_id, account.clone()))
        .unwrap_or_default()
}

pub fn set_stake(env: &Env, pool_id: u32, account: &Address, stake: &Stake) {
    env.storage()
        .persistent()
        .set(&DataKey::Stake(pool_id, account.clone()), stake);
}
