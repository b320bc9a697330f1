use soroban_sdk::{contracttype, Vec};

/// A flat-multiplier emission window ending (exclusively) at `end_ledger`.
///
/// Windows are laid end to end: each one starts where the previous one
/// ended, and the first starts at ledger 0.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BonusWindow {
    pub end_ledger: u64,
    pub multiplier: u32,
}

/// Check that window ends are strictly increasing.
pub fn validate_schedule(schedule: &Vec<BonusWindow>) -> bool {
    let mut previous_end: Option<u64> = None;
    for window in schedule.iter() {
        if let Some(end) = previous_end {
            if window.end_ledger <= end {
                return false;
            }
        }
        previous_end = Some(window.end_ledger);
    }
    true
}

/// Emission multiplier summed over the ledger range `[from, to)`.
///
/// Ranges straddling window boundaries are split per window. Ledgers past
/// the last window contribute nothing. Returns `None` on overflow.
pub fn bonus_multiplier(schedule: &Vec<BonusWindow>, from: u64, to: u64) -> Option<i128> {
    assert!(from <= to, "bonus range starts after it ends");

    let mut total: i128 = 0;
    let mut window_start = 0u64;
    for window in schedule.iter() {
        if window_start >= to {
            break;
        }
        let lo = from.max(window_start);
        let hi = to.min(window.end_ledger);
        if hi > lo {
            let span = i128::from(hi - lo);
            total = total.checked_add(span.checked_mul(i128::from(window.multiplier))?)?;
        }
        window_start = window.end_ledger;
    }
    Some(total)
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{vec, Env};

    fn launch_schedule(env: &Env) -> Vec<BonusWindow> {
        // 10x until ledger 100, 1x until 200, nothing after.
        vec![
            env,
            BonusWindow { end_ledger: 100, multiplier: 10 },
            BonusWindow { end_ledger: 200, multiplier: 1 },
        ]
    }

    #[test]
    fn test_range_inside_single_window() {
        let env = Env::default();
        let schedule = launch_schedule(&env);

        assert_eq!(bonus_multiplier(&schedule, 10, 20), Some(100));
        assert_eq!(bonus_multiplier(&schedule, 150, 160), Some(10));
        assert_eq!(bonus_multiplier(&schedule, 42, 42), Some(0));
    }

    #[test]
    fn test_range_straddling_windows() {
        let env = Env::default();
        let schedule = launch_schedule(&env);

        // 5 ledgers at 10x, 20 at 1x
        assert_eq!(bonus_multiplier(&schedule, 95, 120), Some(70));
        // 10 ledgers at 10x, 100 at 1x, 50 past the end
        assert_eq!(bonus_multiplier(&schedule, 90, 250), Some(200));
    }

    #[test]
    fn test_emission_ends_after_last_window() {
        let env = Env::default();
        let schedule = launch_schedule(&env);

        assert_eq!(bonus_multiplier(&schedule, 200, 500), Some(0));
        assert_eq!(bonus_multiplier(&schedule, 150, 250), Some(50));

        let empty: Vec<BonusWindow> = Vec::new(&env);
        assert_eq!(bonus_multiplier(&empty, 0, 1_000), Some(0));
    }

    #[test]
    fn test_open_ended_schedule() {
        let env = Env::default();
        let schedule = vec![&env, BonusWindow { end_ledger: u64::MAX, multiplier: 1 }];

        assert_eq!(bonus_multiplier(&schedule, 12, 16), Some(4));
        assert_eq!(bonus_multiplier(&schedule, 1_000_000, 1_000_100), Some(100));
    }

    #[test]
    fn test_widest_range_is_exact() {
        let env = Env::default();
        let schedule = vec![&env, BonusWindow { end_ledger: u64::MAX, multiplier: u32::MAX }];

        let expected = i128::from(u64::MAX) * i128::from(u32::MAX);
        assert_eq!(bonus_multiplier(&schedule, 0, u64::MAX), Some(expected));
    }

    #[test]
    #[should_panic(expected = "bonus range starts after it ends")]
    fn test_reversed_range_is_rejected() {
        let env = Env::default();
        let schedule = launch_schedule(&env);
        bonus_multiplier(&schedule, 20, 10);
    }

    #[test]
    fn test_validate_schedule() {
        let env = Env::default();
        assert!(validate_schedule(&launch_schedule(&env)));
        assert!(validate_schedule(&Vec::new(&env)));

        let overlapping = vec![
            &env,
            BonusWindow { end_ledger: 100, multiplier: 10 },
            BonusWindow { end_ledger: 100, multiplier: 1 },
        ];
        assert!(!validate_schedule(&overlapping));
    }
}
