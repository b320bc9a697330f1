use harvest_shared::{apply_basis_points, bonus_multiplier, ACC_REWARD_SCALE};
use soroban_sdk::Env;

use crate::events::{self, AccruedEvent};
use crate::storage::{self, FarmConfig, Pool, Stake};
use crate::transfer;
use crate::FarmError;

/// Current time index: the ledger sequence number.
pub fn now(env: &Env) -> u64 {
    u64::from(env.ledger().sequence())
}

/// Reward allocated to `pool` for the ledgers `[pool.last_accrual_ledger, now)`.
fn pool_reward(config: &FarmConfig, pool: &Pool, total_weight: u64, now: u64) -> Result<i128, FarmError> {
    if pool.weight == 0 || total_weight == 0 {
        return Ok(0);
    }
    bonus_multiplier(&config.schedule, pool.last_accrual_ledger, now)
        .and_then(|multiplier| multiplier.checked_mul(config.emission_per_ledger))
        .and_then(|emitted| emitted.checked_mul(i128::from(pool.weight)))
        .and_then(|weighted| weighted.checked_div(i128::from(total_weight)))
        .ok_or(FarmError::NumericOverflow)
}

fn acc_increment(reward: i128, total_staked: i128) -> Result<i128, FarmError> {
    reward
        .checked_mul(ACC_REWARD_SCALE)
        .and_then(|scaled| scaled.checked_div(total_staked))
        .ok_or(FarmError::NumericOverflow)
}

/// Bring `pool` current as of this ledger, minting its reward into the
/// farm's custody. Stores the pool and returns the reward minted for it.
pub fn settle(env: &Env, config: &FarmConfig, pool_id: u32, pool: &mut Pool) -> Result<i128, FarmError> {
    let now = now(env);
    if now <= pool.last_accrual_ledger {
        return Ok(0);
    }

    // Emission for an empty pool is forgone, not banked.
    if pool.total_staked == 0 {
        pool.last_accrual_ledger = now;
        storage::set_pool(env, pool_id, pool);
        return Ok(0);
    }

    let reward = pool_reward(config, pool, storage::get_total_weight(env), now)?;
    if reward > 0 {
        pool.acc_reward_per_share = pool
            .acc_reward_per_share
            .checked_add(acc_increment(reward, pool.total_staked)?)
            .ok_or(FarmError::NumericOverflow)?;

        let farm = env.current_contract_address();
        transfer::mint_reward(env, &config.reward_token, &farm, reward)?;

        let dev_reward =
            apply_basis_points(reward, config.dev_fee_bps).ok_or(FarmError::NumericOverflow)?;
        if dev_reward > 0 {
            transfer::mint_reward(env, &config.reward_token, &config.dev_address, dev_reward)?;
        }

        events::accrued(
            env,
            AccruedEvent {
                pool_id,
                reward,
                dev_reward,
                acc_reward_per_share: pool.acc_reward_per_share,
                ledger: now,
            },
        );
    }

    pool.last_accrual_ledger = now;
    storage::set_pool(env, pool_id, pool);
    Ok(reward)
}

/// Settle every pool, in id order.
pub fn settle_all(env: &Env, config: &FarmConfig) -> Result<(), FarmError> {
    for pool_id in 1..=storage::get_pool_count(env) {
        let mut pool = storage::get_pool(env, pool_id)?;
        settle(env, config, pool_id, &mut pool)?;
    }
    Ok(())
}

/// The accumulator `settle` would produce at this ledger, without writing.
pub fn projected_acc_reward_per_share(env: &Env, config: &FarmConfig, pool: &Pool) -> Result<i128, FarmError> {
    let now = now(env);
    if now <= pool.last_accrual_ledger || pool.total_staked == 0 {
        return Ok(pool.acc_reward_per_share);
    }
    let reward = pool_reward(config, pool, storage::get_total_weight(env), now)?;
    pool.acc_reward_per_share
        .checked_add(acc_increment(reward, pool.total_staked)?)
        .ok_or(FarmError::NumericOverflow)
}

/// Reward credited to `amount` staked units at accumulator `acc`, kept at
/// `ACC_REWARD_SCALE` so that payouts round down only once.
pub fn reward_debt(amount: i128, acc_reward_per_share: i128) -> Result<i128, FarmError> {
    amount
        .checked_mul(acc_reward_per_share)
        .ok_or(FarmError::NumericOverflow)
}

/// Reward owed to `stake` since its last settlement, at accumulator `acc`.
pub fn pending(stake: &Stake, acc_reward_per_share: i128) -> Result<i128, FarmError> {
    reward_debt(stake.amount, acc_reward_per_share)?
        .checked_sub(stake.reward_debt)
        .map(|scaled| scaled / ACC_REWARD_SCALE)
        .ok_or(FarmError::NumericOverflow)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pending_tracks_accumulator_growth() {
        // 1 unit staked at acc 5.0, accumulator since grown to 7.25
        let stake = Stake {
            amount: 10_000_000,
            reward_debt: reward_debt(10_000_000, 5 * ACC_REWARD_SCALE).unwrap(),
        };
        let acc = 7 * ACC_REWARD_SCALE + ACC_REWARD_SCALE / 4;
        assert_eq!(pending(&stake, acc).unwrap(), 22_500_000);
    }

    #[test]
    fn test_fresh_stake_has_nothing_pending() {
        let acc = 123_456_789;
        let stake = Stake {
            amount: 777,
            reward_debt: reward_debt(777, acc).unwrap(),
        };
        assert_eq!(pending(&stake, acc).unwrap(), 0);
        assert_eq!(pending(&Stake::default(), acc).unwrap(), 0);
    }

    #[test]
    fn test_increment_rounds_down() {
        // 10 reward over 3 units cannot be split exactly
        let increment = acc_increment(10, 3).unwrap();
        assert_eq!(increment, 3_333_333_333_333);
        assert_eq!(pending(&Stake { amount: 3, reward_debt: 0 }, increment).unwrap(), 9);
    }

    #[test]
    fn test_debt_is_not_rounded_before_payout() {
        // Checkpointed at half a unit of reward per share, now at 1.08
        let stake = Stake {
            amount: 1,
            reward_debt: reward_debt(1, ACC_REWARD_SCALE / 2).unwrap(),
        };
        assert_eq!(stake.reward_debt, ACC_REWARD_SCALE / 2);
        assert_eq!(pending(&stake, 1_083_333_333_333).unwrap(), 0);
        assert_eq!(pending(&stake, 3 * ACC_REWARD_SCALE / 2).unwrap(), 1);
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(reward_debt(i128::MAX, 2), Err(FarmError::NumericOverflow));
        assert_eq!(acc_increment(i128::MAX, 1), Err(FarmError::NumericOverflow));
    }
}
