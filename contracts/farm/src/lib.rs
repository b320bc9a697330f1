#![no_std]
use harvest_shared::{
    validate_basis_points, validate_non_negative_amount, validate_schedule, BonusWindow,
};
use soroban_sdk::{contract, contracterror, contractimpl, log, Address, Env, Vec};

mod accrual;
mod events;
mod storage;
mod transfer;


use events::{MigratedEvent, PoolCreatedEvent, StakeEvent, WeightSetEvent};
pub use storage::{FarmConfig, Pool, Stake};

// Error Types
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FarmError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidPool = 4,
    InsufficientStake = 5,
    InvalidArgument = 6,
    ExternalTransferFailed = 7,
    NumericOverflow = 8,
}

#[contract]
pub struct FarmContract;

#[contractimpl]
impl FarmContract {
    /// Initialize the farm.
    ///
    /// The farm must be made the reward token's minter before any pool
    /// accrues rewards.
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        dev_address: Address,
        dev_fee_bps: u32,
        emission_per_ledger: i128,
        start_ledger: u64,
        schedule: Vec<BonusWindow>,
    ) -> Result<(), FarmError> {
        if storage::has_config(&env) {
            return Err(FarmError::AlreadyInitialized);
        }

        if !validate_non_negative_amount(emission_per_ledger)
            || !validate_basis_points(dev_fee_bps)
            || !validate_schedule(&schedule)
        {
            return Err(FarmError::InvalidArgument);
        }

        admin.require_auth();

        let config = FarmConfig {
            admin: admin.clone(),
            reward_token,
            dev_address,
            dev_fee_bps,
            emission_per_ledger,
            start_ledger,
            schedule,
            migrator: None,
        };

        storage::set_config(&env, &config);
        storage::set_total_weight(&env, 0);
        storage::set_pool_count(&env, 0);

        log!(&env, "Farm initialized by admin: {}", admin);

        Ok(())
    }

    // ------------------------------------------------------------------
    // Pool registry
    // ------------------------------------------------------------------

    /// Register a new pool for `asset_token`, returning its id.
    ///
    /// With `refresh_all`, every existing pool is settled first so the new
    /// weight only dilutes emission from this ledger on.
    pub fn create_pool(
        env: Env,
        admin: Address,
        weight: u32,
        asset_token: Address,
        refresh_all: bool,
    ) -> Result<u32, FarmError> {
        let config = Self::require_admin(&env, &admin)?;

        if refresh_all {
            accrual::settle_all(&env, &config)?;
        }

        let pool_id = storage::get_pool_count(&env)
            .checked_add(1)
            .ok_or(FarmError::NumericOverflow)?;
        let total_weight = storage::get_total_weight(&env)
            .checked_add(u64::from(weight))
            .ok_or(FarmError::NumericOverflow)?;
        let start_ledger = accrual::now(&env).max(config.start_ledger);

        let pool = Pool {
            asset_token: asset_token.clone(),
            weight,
            last_accrual_ledger: start_ledger,
            acc_reward_per_share: 0,
            total_staked: 0,
        };

        storage::set_pool(&env, pool_id, &pool);
        storage::set_pool_count(&env, pool_id);
        storage::set_total_weight(&env, total_weight);

        events::pool_created(
            &env,
            PoolCreatedEvent {
                pool_id,
                asset_token: asset_token.clone(),
                weight,
                total_weight,
                start_ledger,
            },
        );

        log!(&env, "Pool {} created for {} with weight {}", pool_id, asset_token, weight);

        Ok(pool_id)
    }

    /// Change a pool's weight. With `refresh_all` the change only applies to
    /// emission after this ledger.
    pub fn set_weight(
        env: Env,
        admin: Address,
        pool_id: u32,
        weight: u32,
        refresh_all: bool,
    ) -> Result<(), FarmError> {
        let config = Self::require_admin(&env, &admin)?;

        // Fail on unknown ids before settling anything.
        storage::get_pool(&env, pool_id)?;

        if refresh_all {
            accrual::settle_all(&env, &config)?;
        }

        let mut pool = storage::get_pool(&env, pool_id)?;
        let old_weight = pool.weight;
        let total_weight = storage::get_total_weight(&env)
            .checked_sub(u64::from(old_weight))
            .and_then(|rest| rest.checked_add(u64::from(weight)))
            .ok_or(FarmError::NumericOverflow)?;

        pool.weight = weight;
        storage::set_pool(&env, pool_id, &pool);
        storage::set_total_weight(&env, total_weight);

        events::weight_set(
            &env,
            WeightSetEvent {
                pool_id,
                old_weight,
                new_weight: weight,
                total_weight,
            },
        );

        log!(&env, "Pool {} weight set: {} -> {}", pool_id, old_weight, weight);

        Ok(())
    }

    /// Designate the migrator. `None` is rejected: migration can be
    /// redirected but never switched off.
    pub fn set_migrator(env: Env, admin: Address, migrator: Option<Address>) -> Result<(), FarmError> {
        let mut config = Self::require_admin(&env, &admin)?;

        let migrator = migrator.ok_or(FarmError::InvalidArgument)?;
        if migrator == env.current_contract_address() {
            return Err(FarmError::InvalidArgument);
        }

        config.migrator = Some(migrator.clone());
        storage::set_config(&env, &config);

        events::migrator_set(&env, migrator.clone());

        log!(&env, "Migrator set to: {}", migrator);

        Ok(())
    }

    // ------------------------------------------------------------------
    // Accrual
    // ------------------------------------------------------------------

    /// Bring one pool's accumulator current. Anyone may call this.
    pub fn settle(env: Env, pool_id: u32) -> Result<Pool, FarmError> {
        let config = storage::get_config(&env)?;
        let mut pool = storage::get_pool(&env, pool_id)?;
        accrual::settle(&env, &config, pool_id, &mut pool)?;
        Ok(pool)
    }

    /// Bring every pool's accumulator current. Anyone may call this.
    pub fn settle_all(env: Env) -> Result<(), FarmError> {
        let config = storage::get_config(&env)?;
        accrual::settle_all(&env, &config)
    }

    // ------------------------------------------------------------------
    // Stake ledger
    // ------------------------------------------------------------------

    /// Deposit `amount` of the pool's asset, paying out any pending reward
    /// first. A zero deposit only harvests. Returns the reward paid.
    pub fn deposit(env: Env, user: Address, pool_id: u32, amount: i128) -> Result<i128, FarmError> {
        user.require_auth();

        let config = storage::get_config(&env)?;
        if !validate_non_negative_amount(amount) {
            return Err(FarmError::InvalidArgument);
        }

        let mut pool = storage::get_pool(&env, pool_id)?;
        accrual::settle(&env, &config, pool_id, &mut pool)?;

        let mut stake = storage::get_stake(&env, pool_id, &user);
        let harvested = accrual::pending(&stake, pool.acc_reward_per_share)?;
        if harvested > 0 {
            transfer::pay_reward(&env, &config.reward_token, &user, harvested)?;
        }

        if amount > 0 {
            transfer::pull_asset(&env, &pool.asset_token, &user, amount)?;
        }

        stake.amount = stake.amount.checked_add(amount).ok_or(FarmError::NumericOverflow)?;
        stake.reward_debt = accrual::reward_debt(stake.amount, pool.acc_reward_per_share)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(FarmError::NumericOverflow)?;

        storage::set_stake(&env, pool_id, &user, &stake);
        storage::set_pool(&env, pool_id, &pool);

        let ledger = accrual::now(&env);
        events::deposited(
            &env,
            StakeEvent {
                user: user.clone(),
                pool_id,
                amount,
                harvested,
                ledger,
            },
        );

        log!(&env, "User {} deposited {} into pool {}, harvested {}", user, amount, pool_id, harvested);

        Ok(harvested)
    }

    /// Withdraw `amount` of the pool's asset, paying out any pending reward
    /// first. Returns the reward paid.
    pub fn withdraw(env: Env, user: Address, pool_id: u32, amount: i128) -> Result<i128, FarmError> {
        user.require_auth();

        let config = storage::get_config(&env)?;
        if !validate_non_negative_amount(amount) {
            return Err(FarmError::InvalidArgument);
        }

        let mut pool = storage::get_pool(&env, pool_id)?;
        let mut stake = storage::get_stake(&env, pool_id, &user);
        if amount > stake.amount {
            return Err(FarmError::InsufficientStake);
        }

        accrual::settle(&env, &config, pool_id, &mut pool)?;

        let harvested = accrual::pending(&stake, pool.acc_reward_per_share)?;
        if harvested > 0 {
            transfer::pay_reward(&env, &config.reward_token, &user, harvested)?;
        }

        if amount > 0 {
            transfer::push_asset(&env, &pool.asset_token, &user, amount)?;
        }

        stake.amount -= amount;
        stake.reward_debt = accrual::reward_debt(stake.amount, pool.acc_reward_per_share)?;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(FarmError::NumericOverflow)?;

        storage::set_stake(&env, pool_id, &user, &stake);
        storage::set_pool(&env, pool_id, &pool);

        let ledger = accrual::now(&env);
        events::withdrawn(
            &env,
            StakeEvent {
                user: user.clone(),
                pool_id,
                amount,
                harvested,
                ledger,
            },
        );

        log!(&env, "User {} withdrew {} from pool {}, harvested {}", user, amount, pool_id, harvested);

        Ok(harvested)
    }

    /// Return the caller's whole stake without settling. Pending reward is
    /// forfeited. Returns the amount withdrawn.
    pub fn emergency_withdraw(env: Env, user: Address, pool_id: u32) -> Result<i128, FarmError> {
        user.require_auth();

        storage::get_config(&env)?;
        let mut pool = storage::get_pool(&env, pool_id)?;
        let stake = storage::get_stake(&env, pool_id, &user);
        let amount = stake.amount;

        if amount > 0 {
            transfer::push_asset(&env, &pool.asset_token, &user, amount)?;
        }

        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(FarmError::NumericOverflow)?;

        storage::set_stake(&env, pool_id, &user, &Stake::default());
        storage::set_pool(&env, pool_id, &pool);

        let ledger = accrual::now(&env);
        events::emergency_withdrawn(
            &env,
            StakeEvent {
                user: user.clone(),
                pool_id,
                amount,
                harvested: 0,
                ledger,
            },
        );

        log!(&env, "User {} emergency withdrew {} from pool {}", user, amount, pool_id);

        Ok(amount)
    }

    /// Reward `account` would be paid by a deposit or withdraw at this ledger.
    pub fn pending_reward(env: Env, pool_id: u32, account: Address) -> Result<i128, FarmError> {
        let config = storage::get_config(&env)?;
        let pool = storage::get_pool(&env, pool_id)?;
        let stake = storage::get_stake(&env, pool_id, &account);

        let acc = accrual::projected_acc_reward_per_share(&env, &config, &pool)?;
        accrual::pending(&stake, acc)
    }

    // ------------------------------------------------------------------
    // Migration
    // ------------------------------------------------------------------

    /// Swap a pool's custody from its current asset to `successor_asset`.
    ///
    /// The whole custody is handed to the migrator, and the same amount of
    /// the successor asset is pulled back from it. Stakes and the
    /// accumulator are untouched.
    pub fn migrate(
        env: Env,
        migrator: Address,
        pool_id: u32,
        successor_asset: Address,
    ) -> Result<(), FarmError> {
        Self::require_migrator(&env, &migrator)?;

        let mut pool = storage::get_pool(&env, pool_id)?;
        if successor_asset == pool.asset_token {
            return Err(FarmError::InvalidArgument);
        }

        let custody = pool.total_staked;
        if custody > 0 {
            transfer::push_asset(&env, &pool.asset_token, &migrator, custody)?;
            transfer::pull_asset(&env, &successor_asset, &migrator, custody)?;
        }

        let old_asset = pool.asset_token.clone();
        pool.asset_token = successor_asset.clone();
        storage::set_pool(&env, pool_id, &pool);

        events::migrated(
            &env,
            MigratedEvent {
                pool_id,
                old_asset: old_asset.clone(),
                new_asset: successor_asset.clone(),
                amount: custody,
            },
        );

        log!(&env, "Pool {} migrated from {} to {} ({} units)", pool_id, old_asset, successor_asset, custody);

        Ok(())
    }

    // ------------------------------------------------------------------
    // Roles
    // ------------------------------------------------------------------

    pub fn transfer_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), FarmError> {
        let mut config = Self::require_admin(&env, &admin)?;

        config.admin = new_admin.clone();
        storage::set_config(&env, &config);

        events::admin_changed(&env, admin, new_admin.clone());

        log!(&env, "Admin transferred to: {}", new_admin);

        Ok(())
    }

    /// Hand the dev fund to `new_dev`. Only the current dev may do this.
    pub fn set_dev_address(env: Env, dev: Address, new_dev: Address) -> Result<(), FarmError> {
        dev.require_auth();

        let mut config = storage::get_config(&env)?;
        if config.dev_address != dev {
            return Err(FarmError::Unauthorized);
        }

        config.dev_address = new_dev.clone();
        storage::set_config(&env, &config);

        events::dev_changed(&env, dev, new_dev.clone());

        log!(&env, "Dev address set to: {}", new_dev);

        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn pool_info(env: Env, pool_id: u32) -> Result<Pool, FarmError> {
        storage::get_pool(&env, pool_id)
    }

    pub fn stake_info(env: Env, pool_id: u32, account: Address) -> Result<Stake, FarmError> {
        storage::get_pool(&env, pool_id)?;
        Ok(storage::get_stake(&env, pool_id, &account))
    }

    pub fn total_weight(env: Env) -> u64 {
        storage::get_total_weight(&env)
    }

    pub fn pool_count(env: Env) -> u32 {
        storage::get_pool_count(&env)
    }

    pub fn get_config(env: Env) -> Result<FarmConfig, FarmError> {
        storage::get_config(&env)
    }

    /// Emission multiplier of the configured schedule over `[from, to)`.
    pub fn bonus_multiplier(env: Env, from: u64, to: u64) -> Result<i128, FarmError> {
        if from > to {
            return Err(FarmError::InvalidArgument);
        }
        let config = storage::get_config(&env)?;
        harvest_shared::bonus_multiplier(&config.schedule, from, to).ok_or(FarmError::NumericOverflow)
    }
}

impl FarmContract {
    fn require_admin(env: &Env, caller: &Address) -> Result<FarmConfig, FarmError> {
        caller.require_auth();

        let config = storage::get_config(env)?;
        if config.admin != *caller {
            return Err(FarmError::Unauthorized);
        }
        Ok(config)
    }

    fn require_migrator(env: &Env, caller: &Address) -> Result<FarmConfig, FarmError> {
        caller.require_auth();

        let config = storage::get_config(env)?;
        if config.migrator.as_ref() != Some(caller) {
            return Err(FarmError::Unauthorized);
        }
        Ok(config)
    }
}
