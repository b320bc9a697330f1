use soroban_sdk::{contractclient, Address, Env};

/// The slice of the reward token the farm depends on.
///
/// The farm must hold the minter role; a Stellar Asset Contract whose admin
/// is the farm satisfies this interface.
#[contractclient(name = "RewardTokenClient")]
pub trait RewardTokenInterface {
    fn mint(env: Env, to: Address, amount: i128);
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
    fn balance(env: Env, id: Address) -> i128;
}

/// The slice of a pool's staked asset the farm depends on.
#[contractclient(name = "AssetTokenClient")]
pub trait AssetTokenInterface {
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
    fn balance(env: Env, id: Address) -> i128;
}
