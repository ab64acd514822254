use soroban_sdk::{contracttype, Address, Env};

// ── Storage keys ────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Singleton configuration (owner, base asset, rates, pause flag).
    Config,
    /// Singleton reward accounting state.
    Pool,
    /// Per-holder stake record: `DataKey::User(holder)`.
    User(Address),
    /// Share-token approval: `DataKey::Allowance(owner, spender)`.
    Allowance(Address, Address),
}

const PERSISTENT_TTL_THRESHOLD: u32 = 5_184_000; // ~60 days
const PERSISTENT_TTL_EXTEND_TO: u32 = 10_368_000; // ~120 days

fn extend_entry_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND_TO);
}

// ── Types ───────────────────────────────────────────────────────────────────

/// Contract configuration. Written once at initialization; individual fields
/// are overwritten by the owner-only setters.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Config {
    /// Address allowed to call owner-only functions.
    pub admin: Address,
    /// The external token deposited, paid out, and used for rewards.
    pub base_asset: Address,
    /// Mirrors `base_asset` decimals; fixed at initialization.
    pub decimals: u32,
    /// Annual reward rate in basis points (2500 = 25.00 %).
    pub apr_bps: u32,
    /// Minimum seconds between successful harvests by one holder.
    pub harvest_interval: u64,
    /// Blocks user-facing mutators while `true`; owner functions stay open.
    pub paused: bool,
}

/// Global reward accounting state.
///
/// `acc_reward_per_share` and `last_reward_time` move together and only
/// inside the pool checkpoint; `required_balance` tracks principal plus all
/// accrued, unharvested reward so the pool's liabilities are readable in
/// O(1) without touching holder records.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Pool {
    pub total_amount: i128,
    pub required_balance: i128,
    pub acc_reward_per_share: i128,
    pub last_reward_time: u64,
}

/// Per-holder stake record, materialized lazily on first touch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserInfo {
    /// Principal currently staked.
    pub amount: i128,
    /// `amount × arps / CALC_DECIMALS` at the last principal change.
    pub reward_debt: i128,
    /// Reward credited at earlier principal changes, not yet harvested.
    pub accumulated_reward: i128,
    /// Ledger time of the last successful harvest; 0 until the first one.
    pub last_harvest_time: u64,
}

impl UserInfo {
    pub fn zeroed() -> Self {
        UserInfo {
            amount: 0,
            reward_debt: 0,
            accumulated_reward: 0,
            last_harvest_time: 0,
        }
    }
}

// ── Accessors ───────────────────────────────────────────────────────────────

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Config {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .expect("Staking: not initialized")
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_pool(env: &Env) -> Pool {
    env.storage()
        .instance()
        .get(&DataKey::Pool)
        .expect("Staking: not initialized")
}

pub fn set_pool(env: &Env, pool: &Pool) {
    env.storage().instance().set(&DataKey::Pool, pool);
}

/// Fetch a holder record, returning an all-zero record for unknown holders.
pub fn get_user(env: &Env, holder: &Address) -> UserInfo {
    let key = DataKey::User(holder.clone());
    match env.storage().persistent().get(&key) {
        Some(user) => {
            extend_entry_ttl(env, &key);
            user
        }
        None => UserInfo::zeroed(),
    }
}

pub fn set_user(env: &Env, holder: &Address, user: &UserInfo) {
    let key = DataKey::User(holder.clone());
    env.storage().persistent().set(&key, user);
    extend_entry_ttl(env, &key);
}

pub fn get_allowance(env: &Env, owner: &Address, spender: &Address) -> i128 {
    let key = DataKey::Allowance(owner.clone(), spender.clone());
    match env.storage().persistent().get(&key) {
        Some(value) => {
            extend_entry_ttl(env, &key);
            value
        }
        None => 0,
    }
}

pub fn set_allowance(env: &Env, owner: &Address, spender: &Address, amount: i128) {
    let key = DataKey::Allowance(owner.clone(), spender.clone());
    env.storage().persistent().set(&key, &amount);
    extend_entry_ttl(env, &key);
}
