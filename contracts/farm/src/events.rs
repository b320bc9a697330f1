use soroban_sdk::{contracttype, symbol_short, Address, Env};

// Events
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub pool_id: u32,
    pub asset_token: Address,
    pub weight: u32,
    pub total_weight: u64,
    pub start_ledger: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeightSetEvent {
    pub pool_id: u32,
    pub old_weight: u32,
    pub new_weight: u32,
    pub total_weight: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeEvent {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub harvested: i128,
    pub ledger: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccruedEvent {
    pub pool_id: u32,
    pub reward: i128,
    pub dev_reward: i128,
    pub acc_reward_per_share: i128,
    pub ledger: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigratedEvent {
    pub pool_id: u32,
    pub old_asset: Address,
    pub new_asset: Address,
    pub amount: i128,
}

pub fn pool_created(env: &Env, event: PoolCreatedEvent) {
    env.events().publish((symbol_short!("pool_add"), event.pool_id), event);
}

pub fn weight_set(env: &Env, event: WeightSetEvent) {
    env.events().publish((symbol_short!("weight"), event.pool_id), event);
}

pub fn deposited(env: &Env, event: StakeEvent) {
    env.events().publish((symbol_short!("deposit"), event.pool_id), event);
}

pub fn withdrawn(env: &Env, event: StakeEvent) {
    env.events().publish((symbol_short!("withdraw"), event.pool_id), event);
}

pub fn emergency_withdrawn(env: &Env, event: StakeEvent) {
    env.events().publish((symbol_short!("emergency"), event.pool_id), event);
}

pub fn accrued(env: &Env, event: AccruedEvent) {
    env.events().publish((symbol_short!("accrued"), event.pool_id), event);
}

pub fn migrated(env: &Env, event: MigratedEvent) {
    env.events().publish((symbol_short!("migrate"), event.pool_id), event);
}

pub fn migrator_set(env: &Env, migrator: Address) {
    env.events().publish((symbol_short!("migrator"),), migrator);
}

pub fn admin_changed(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish((symbol_short!("admin"),), (old_admin, new_admin));
}

pub fn dev_changed(env: &Env, old_dev: Address, new_dev: Address) {
    env.events().publish((symbol_short!("dev"),), (old_dev, new_dev));
}
