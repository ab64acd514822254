#![no_std]

pub mod events;
pub mod rewards;
pub mod storage;

use soroban_sdk::{contract, contractimpl, token, Address, Env};

use storage::{Config, Pool, UserInfo};

/// Default annual rate: 25.00 %.
const DEFAULT_APR_BPS: u32 = 2500;
/// Default harvest cooldown: 24 hours.
const DEFAULT_HARVEST_INTERVAL: u64 = 86_400;

// ── Guards ──────────────────────────────────────────────────────────────────

fn require_not_paused(env: &Env) {
    if storage::get_config(env).paused {
        panic!("Staking: contract paused.");
    }
}

fn require_owner(env: &Env, caller: &Address) {
    caller.require_auth();
    if *caller != storage::get_config(env).admin {
        panic!("Staking: permitted to owner only.");
    }
}

fn check_nonnegative_amount(amount: i128) {
    if amount < 0 {
        panic!("negative amount is not allowed");
    }
}

// ── Internal accounting ─────────────────────────────────────────────────────

/// Commit reward accrual up to the current ledger time and return the fresh
/// pool state. The sole writer of `acc_reward_per_share` and
/// `last_reward_time` outside `initialize`; calling it twice within one
/// timestamp is a no-op.
fn checkpoint_pool(env: &Env) -> Pool {
    let mut pool = storage::get_pool(env);
    let now = env.ledger().timestamp();
    if now == pool.last_reward_time {
        return pool;
    }

    let config = storage::get_config(env);
    let elapsed = now.saturating_sub(pool.last_reward_time);
    let fresh = rewards::accrue_reward_per_share(
        pool.acc_reward_per_share,
        config.apr_bps,
        elapsed,
        pool.total_amount,
    );

    // Liabilities grow by exactly the reward minted to the whole pool.
    pool.required_balance += rewards::reward_debt(
        pool.total_amount,
        fresh - pool.acc_reward_per_share,
    );
    pool.acc_reward_per_share = fresh;
    pool.last_reward_time = now;
    storage::set_pool(env, &pool);
    pool
}

/// `acc_reward_per_share` advanced to the current ledger time without
/// committing, for read-only balance queries.
fn live_arps(env: &Env, pool: &Pool, config: &Config) -> i128 {
    let elapsed = env
        .ledger()
        .timestamp()
        .saturating_sub(pool.last_reward_time);
    rewards::accrue_reward_per_share(
        pool.acc_reward_per_share,
        config.apr_bps,
        elapsed,
        pool.total_amount,
    )
}

/// Fold a holder's uncredited reward into `accumulated_reward`.
///
/// Must run before any change to `user.amount`, while `arps` is fresh;
/// the caller recomputes `reward_debt` afterwards.
fn credit_pending(user: &mut UserInfo, arps: i128) {
    if user.amount > 0 {
        user.accumulated_reward += rewards::reward_debt(user.amount, arps) - user.reward_debt;
    }
}

/// Move `amount` of principal between holders, splitting each side's pending
/// reward into their `accumulated_reward` first. `total_amount` is unchanged.
///
/// The sender is written back before the receiver is read, so a self-transfer
/// observes its own update and degrades to a no-op on `amount`.
fn move_principal(env: &Env, from: &Address, to: &Address, amount: i128) {
    let pool = checkpoint_pool(env);
    let arps = pool.acc_reward_per_share;

    let mut sender = storage::get_user(env, from);
    credit_pending(&mut sender, arps);
    if amount > sender.amount {
        panic!("ERC20: transfer amount exceeds balance");
    }
    sender.amount -= amount;
    sender.reward_debt = rewards::reward_debt(sender.amount, arps);
    storage::set_user(env, from, &sender);

    let mut receiver = storage::get_user(env, to);
    credit_pending(&mut receiver, arps);
    receiver.amount += amount;
    receiver.reward_debt = rewards::reward_debt(receiver.amount, arps);
    storage::set_user(env, to, &receiver);

    events::publish_transfer(env, from, to, amount);
}

fn base_asset_client(env: &Env) -> token::Client {
    token::Client::new(env, &storage::get_config(env).base_asset)
}

// ── Contract ────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    /// Set up the pool for the first time.
    ///
    /// `decimals` is copied from the base asset and never changes afterwards.
    /// Reward accrual starts from the current ledger time.
    pub fn initialize(env: Env, admin: Address, base_asset: Address) {
        if storage::has_config(&env) {
            panic!("Staking: already initialized");
        }
        admin.require_auth();

        let decimals = token::Client::new(&env, &base_asset).decimals();
        storage::set_config(
            &env,
            &Config {
                admin,
                base_asset,
                decimals,
                apr_bps: DEFAULT_APR_BPS,
                harvest_interval: DEFAULT_HARVEST_INTERVAL,
                paused: false,
            },
        );
        storage::set_pool(
            &env,
            &Pool {
                total_amount: 0,
                required_balance: 0,
                acc_reward_per_share: 0,
                last_reward_time: env.ledger().timestamp(),
            },
        );
    }

    // ── Reward accumulator ──────────────────────────────────────────────────

    /// Commit reward accrual up to the current ledger time.
    ///
    /// Anyone may call this; every state-mutating entry point runs the same
    /// checkpoint internally before touching holder records.
    pub fn update_reward_pool(env: Env) {
        require_not_paused(&env);
        checkpoint_pool(&env);
    }

    // ── Stake lifecycle ─────────────────────────────────────────────────────

    /// Deposit `amount` of the base asset from `from`, staking it for `to`.
    pub fn mint(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        require_not_paused(&env);
        let mut pool = checkpoint_pool(&env);
        if amount <= 0 {
            panic!("Staking: Nothing to deposit");
        }

        base_asset_client(&env).transfer(&from, &env.current_contract_address(), &amount);

        let mut user = storage::get_user(&env, &to);
        credit_pending(&mut user, pool.acc_reward_per_share);
        user.amount += amount;
        user.reward_debt = rewards::reward_debt(user.amount, pool.acc_reward_per_share);
        storage::set_user(&env, &to, &user);

        pool.total_amount += amount;
        pool.required_balance += amount;
        storage::set_pool(&env, &pool);

        events::publish_mint(&env, &to, amount);
    }

    /// Withdraw `amount` of `from`'s principal, releasing the base asset
    /// to `to`. Pending reward stays credited for a later harvest.
    pub fn burn(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        require_not_paused(&env);
        let mut pool = checkpoint_pool(&env);
        if amount <= 0 {
            panic!("Staking: Nothing to burn");
        }

        let mut user = storage::get_user(&env, &from);
        if amount > user.amount {
            panic!("Staking: Insufficient share");
        }
        credit_pending(&mut user, pool.acc_reward_per_share);
        user.amount -= amount;
        user.reward_debt = rewards::reward_debt(user.amount, pool.acc_reward_per_share);
        storage::set_user(&env, &from, &user);

        pool.total_amount -= amount;
        pool.required_balance -= amount;
        storage::set_pool(&env, &pool);

        // State is committed before the external transfer.
        base_asset_client(&env).transfer(&env.current_contract_address(), &to, &amount);

        events::publish_burn(&env, &from, amount);
    }

    /// Pay out `amount` of `from`'s pending reward. Principal is untouched.
    ///
    /// Reward payouts draw from the pool's base-asset balance; reserves are
    /// topped up out of band and a shortfall surfaces as the token transfer's
    /// own failure.
    pub fn harvest(env: Env, from: Address, amount: i128) {
        from.require_auth();
        require_not_paused(&env);
        let mut pool = checkpoint_pool(&env);
        if amount <= 0 {
            panic!("Staking: Nothing to harvest");
        }

        let config = storage::get_config(&env);
        let mut user = storage::get_user(&env, &from);
        let pending = rewards::pending_reward(
            user.amount,
            pool.acc_reward_per_share,
            user.reward_debt,
            user.accumulated_reward,
        );
        if amount > pending {
            panic!("Staking: Insufficient to harvest");
        }

        // Cooldown is keyed on the harvester; 0 means never harvested.
        let now = env.ledger().timestamp();
        if user.last_harvest_time != 0
            && now.saturating_sub(user.last_harvest_time) < config.harvest_interval
        {
            panic!("Staking: less than 24 hours since last harvest");
        }

        user.accumulated_reward = pending - amount;
        user.reward_debt = rewards::reward_debt(user.amount, pool.acc_reward_per_share);
        user.last_harvest_time = now;
        storage::set_user(&env, &from, &user);

        pool.required_balance -= amount;
        storage::set_pool(&env, &pool);

        base_asset_client(&env).transfer(&env.current_contract_address(), &from, &amount);

        events::publish_harvest(&env, &from, amount);
    }

    // ── Share-token facade ──────────────────────────────────────────────────

    /// Live share balance: principal plus pending reward, accrued to the
    /// current ledger time without committing.
    pub fn balance(env: Env, id: Address) -> i128 {
        let pool = storage::get_pool(&env);
        let config = storage::get_config(&env);
        let user = storage::get_user(&env, &id);
        let arps = live_arps(&env, &pool, &config);
        user.amount
            + rewards::pending_reward(user.amount, arps, user.reward_debt, user.accumulated_reward)
    }

    /// Total principal plus all accrued, unharvested reward.
    pub fn total_supply(env: Env) -> i128 {
        let pool = storage::get_pool(&env);
        let config = storage::get_config(&env);
        let arps = live_arps(&env, &pool, &config);
        pool.required_balance
            + rewards::reward_debt(pool.total_amount, arps - pool.acc_reward_per_share)
    }

    /// Move `amount` of principal from `from` to `to`.
    ///
    /// Each side's pending reward is credited first, so transfers never move
    /// or destroy accrued yield. The balance check is against principal:
    /// pending reward cannot be transferred, only harvested.
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        require_not_paused(&env);
        check_nonnegative_amount(amount);
        move_principal(&env, &from, &to, amount);
    }

    /// Spend `from`'s allowance to move principal, as `transfer`.
    pub fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        require_not_paused(&env);
        check_nonnegative_amount(amount);

        let allowance = storage::get_allowance(&env, &from, &spender);
        if amount > allowance {
            panic!("ERC20: transfer amount exceeds allowance");
        }
        storage::set_allowance(&env, &from, &spender, allowance - amount);

        move_principal(&env, &from, &to, amount);
    }

    /// Overwrite `spender`'s allowance over `from`'s shares.
    pub fn approve(env: Env, from: Address, spender: Address, amount: i128) {
        from.require_auth();
        require_not_paused(&env);
        check_nonnegative_amount(amount);
        storage::set_allowance(&env, &from, &spender, amount);
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::get_allowance(&env, &from, &spender)
    }

    /// Share decimals, mirroring the base asset.
    pub fn decimals(env: Env) -> u32 {
        storage::get_config(&env).decimals
    }

    // ── Administration ──────────────────────────────────────────────────────

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) {
        require_owner(&env, &caller);
        let mut config = storage::get_config(&env);
        config.admin = new_owner.clone();
        storage::set_config(&env, &config);
        events::publish_ownership(&env, &new_owner);
    }

    /// Change the annual rate.
    ///
    /// No checkpoint runs here: time elapsed since the last committed update
    /// accrues at the new rate when the next checkpoint commits it.
    pub fn set_apr(env: Env, caller: Address, apr_bps: u32) {
        require_owner(&env, &caller);
        let mut config = storage::get_config(&env);
        config.apr_bps = apr_bps;
        storage::set_config(&env, &config);
        events::publish_set_apr(&env, apr_bps);
    }

    pub fn set_harvest_interval(env: Env, caller: Address, secs: u64) {
        require_owner(&env, &caller);
        let mut config = storage::get_config(&env);
        config.harvest_interval = secs;
        storage::set_config(&env, &config);
        events::publish_set_harvest_interval(&env, secs);
    }

    pub fn toggle_pause(env: Env, caller: Address) {
        require_owner(&env, &caller);
        let mut config = storage::get_config(&env);
        config.paused = !config.paused;
        storage::set_config(&env, &config);
        events::publish_pause_toggled(&env, config.paused);
    }

    /// Rescue `amount` of any token held by the pool, pause state
    /// notwithstanding. Used to fund reward reserves back out or to recover
    /// stray deposits.
    pub fn withdraw_token(env: Env, caller: Address, token: Address, to: Address, amount: i128) {
        caller.require_auth();
        if caller != storage::get_config(&env).admin {
            panic!("Staking: permitted to owner only");
        }
        check_nonnegative_amount(amount);

        token::Client::new(&env, &token).transfer(&env.current_contract_address(), &to, &amount);

        events::publish_withdraw(&env, &token, &to, amount);
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn admin(env: Env) -> Address {
        storage::get_config(&env).admin
    }

    pub fn total_amount(env: Env) -> i128 {
        storage::get_pool(&env).total_amount
    }

    /// Principal plus committed reward liabilities; the pool's base-asset
    /// balance must stay at or above this for every holder to exit.
    pub fn required_balance(env: Env) -> i128 {
        storage::get_pool(&env).required_balance
    }

    pub fn acc_reward_per_share(env: Env) -> i128 {
        storage::get_pool(&env).acc_reward_per_share
    }

    pub fn last_reward_time(env: Env) -> u64 {
        storage::get_pool(&env).last_reward_time
    }

    pub fn apr_bps(env: Env) -> u32 {
        storage::get_config(&env).apr_bps
    }

    pub fn harvest_interval(env: Env) -> u64 {
        storage::get_config(&env).harvest_interval
    }

    pub fn is_paused(env: Env) -> bool {
        storage::get_config(&env).paused
    }

    pub fn user_info(env: Env, holder: Address) -> UserInfo {
        storage::get_user(&env, &holder)
    }
}
