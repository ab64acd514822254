use soroban_sdk::{symbol_short, Address, Env};

/// Share-token mint: principal entered the pool for `to`.
pub fn publish_mint(env: &Env, to: &Address, amount: i128) {
    env.events().publish((symbol_short!("mint"), to.clone()), amount);
}

/// Share-token burn: principal left the pool from `from`.
pub fn publish_burn(env: &Env, from: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("burn"), from.clone()), amount);
}

/// Principal moved between holders; total stake is unchanged.
pub fn publish_transfer(env: &Env, from: &Address, to: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("transfer"), from.clone(), to.clone()), amount);
}

/// Reward paid out to `from`; principal is untouched.
pub fn publish_harvest(env: &Env, from: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("harvest"), from.clone()), amount);
}

pub fn publish_set_apr(env: &Env, apr_bps: u32) {
    env.events().publish((symbol_short!("set_apr"),), apr_bps);
}

pub fn publish_set_harvest_interval(env: &Env, secs: u64) {
    env.events().publish((symbol_short!("set_ivl"),), secs);
}

pub fn publish_pause_toggled(env: &Env, paused: bool) {
    env.events().publish((symbol_short!("paused"),), paused);
}

pub fn publish_ownership(env: &Env, new_owner: &Address) {
    env.events()
        .publish((symbol_short!("ownership"), new_owner.clone()), ());
}

pub fn publish_withdraw(env: &Env, token: &Address, to: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("withdraw"), token.clone(), to.clone()), amount);
}
