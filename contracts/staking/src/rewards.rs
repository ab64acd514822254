/// Fixed-point scaling factor.
///
/// All reward-per-share values are multiplied by this constant before storage
/// to preserve sub-unit precision without floating-point arithmetic.
/// Using 10^12 gives 12 decimal places of precision, which is more than
/// sufficient for token amounts up to 10^18.
pub const CALC_DECIMALS: i128 = 1_000_000_000_000;

/// Denominator for rates expressed in basis points: `2500` means 25.00 %.
pub const BASIS_POINTS_DIVISOR: i128 = 10_000;

/// Seconds in a Julian year (365.25 days).
pub const SECONDS_PER_YEAR: i128 = 31_557_600;

// ── Core reward engine ──────────────────────────────────────────────────────

/// Advance the global `acc_reward_per_share` scalar across `elapsed` seconds.
///
/// This is the fundamental O(1) accumulation step:
///
/// ```text
/// Δarps = CALC_DECIMALS × elapsed × apr_bps / 10_000 / SECONDS_PER_YEAR
/// new_arps = stored_arps + Δarps
/// ```
///
/// The multiplications run before either division so truncation happens
/// once, at the end, on the widest product. All divisions floor.
///
/// When `total_staked` is zero we return `stored` unchanged — no stakers
/// means no distribution and no orphaned rewards.
///
/// # Arguments
/// * `stored`       – current `acc_reward_per_share` (scaled by CALC_DECIMALS)
/// * `apr_bps`      – annual rate in basis points
/// * `elapsed`      – seconds since the last committed update
/// * `total_staked` – sum of all holders' principal
#[allow(clippy::arithmetic_side_effects)]
pub fn accrue_reward_per_share(
    stored: i128,
    apr_bps: u32,
    elapsed: u64,
    total_staked: i128,
) -> i128 {
    if total_staked <= 0 || elapsed == 0 {
        return stored;
    }

    // elapsed is u64 and apr_bps is u32; both casts to i128 are lossless.
    let delta = CALC_DECIMALS
        .saturating_mul(elapsed as i128)
        .saturating_mul(apr_bps as i128)
        / BASIS_POINTS_DIVISOR
        / SECONDS_PER_YEAR;

    stored.saturating_add(delta)
}

/// The subtraction baseline for a holder: `amount × arps / CALC_DECIMALS`.
///
/// Recomputed every time a holder's principal changes; subtracting the stored
/// baseline from the same product at a later `arps` isolates exactly the
/// reward earned since that change.
#[allow(clippy::arithmetic_side_effects)]
pub fn reward_debt(amount: i128, arps: i128) -> i128 {
    amount.saturating_mul(arps) / CALC_DECIMALS
}

/// Total reward currently owed to a single holder.
///
/// ```text
/// pending = amount × arps / CALC_DECIMALS − debt + accumulated
/// ```
///
/// `accumulated` carries reward already credited at earlier principal
/// changes but not yet harvested, so prior credits are never double-counted.
#[allow(clippy::arithmetic_side_effects)]
pub fn pending_reward(amount: i128, arps: i128, debt: i128, accumulated: i128) -> i128 {
    reward_debt(amount, arps)
        .saturating_sub(debt)
        .saturating_add(accumulated)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// These are pure-math tests with no Soroban environment dependency.

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    #[test]
    fn arps_unchanged_when_no_stakers() {
        let arps = accrue_reward_per_share(500, 2500, 86_400, 0);
        assert_eq!(arps, 500, "ARPS must not change when total_staked is zero");
    }

    #[test]
    fn arps_unchanged_when_no_time_passed() {
        let arps = accrue_reward_per_share(500, 2500, 0, 1_000);
        assert_eq!(arps, 500);
    }

    #[test]
    fn arps_one_day_at_default_apr() {
        // 10^12 × 86_400 × 2_500 / 10_000 / 31_557_600 = 684_462_696 (floored)
        let arps = accrue_reward_per_share(0, 2500, 86_400, 1_000);
        assert_eq!(arps, 684_462_696);
    }

    #[test]
    fn arps_accumulates_per_rate_table() {
        for (elapsed, apr_bps, expected) in [
            (100u64, 1200u32, 380_257i128),
            (1_000, 7500, 23_766_065),
            (5_000, 900, 14_259_639),
        ] {
            let arps = accrue_reward_per_share(0, apr_bps, elapsed, 150 * 10i128.pow(18));
            assert_eq!(arps, expected, "elapsed={elapsed} apr={apr_bps}");
        }
    }

    #[test]
    fn arps_full_year_is_exact() {
        // Over exactly one year the seconds cancel: Δarps = 10^12 × apr / 10^4.
        let arps = accrue_reward_per_share(0, 2500, SECONDS_PER_YEAR as u64, 1_000);
        assert_eq!(arps, 250_000_000_000);
    }

    #[test]
    fn multiply_before_divide_preserves_small_increments() {
        // One second at 0.01 % APR: 10^12 × 1 × 1 / 10^4 / 31_557_600 = 3.
        // Dividing before multiplying would truncate this to zero.
        let arps = accrue_reward_per_share(0, 1, 1, 1_000);
        assert_eq!(arps, 3);
    }

    #[test]
    fn pending_zero_when_debt_is_current() {
        // A holder whose debt was recomputed at the current ARPS has earned
        // nothing new; only the accumulated balance remains.
        let arps = 684_462_696;
        let debt = reward_debt(1_000_000, arps);
        assert_eq!(pending_reward(1_000_000, arps, debt, 50), 50);
    }

    #[test]
    fn pending_isolates_accrual_since_last_change() {
        // Debt taken at ARPS=0, read back after one day at 25 % APR.
        let arps = accrue_reward_per_share(0, 2500, 86_400, 974_426_000_000);
        let pending = pending_reward(974_426_000_000, arps, 0, 0);
        assert_eq!(pending, 666_958_247);
    }

    #[test]
    fn pending_does_not_overflow_large_amounts() {
        // Stress test: large stake × large ARPS. saturating_mul clamps at
        // i128::MAX rather than wrapping, so the result must stay positive
        // and the call must not panic.
        let large_stake: i128 = 10i128.pow(18);
        let arps = CALC_DECIMALS.saturating_mul(1_000);
        let p = pending_reward(large_stake, arps, 0, 0);
        assert_eq!(p, large_stake.saturating_mul(1_000));
    }
}
