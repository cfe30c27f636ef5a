//! Combination enumeration over the identifier universe.

use crate::types::{ChangeLevel, Combination, CHANGE_LEVELS};

/// Enumerate the full cross product of main id × trend id × change
/// level, in stable order, optionally truncated to `limit` entries.
pub fn enumerate_combinations(ids: &[String], limit: Option<usize>) -> Vec<Combination> {
    let cap = limit.unwrap_or(ids.len() * ids.len() * CHANGE_LEVELS.len());
    let mut combos = Vec::with_capacity(cap.min(ids.len() * ids.len() * CHANGE_LEVELS.len()));
    'outer: for main in ids {
        for trend in ids {
            for change in CHANGE_LEVELS {
                if combos.len() >= cap {
                    break 'outer;
                }
                combos.push(Combination {
                    main: main.clone(),
                    trend: trend.clone(),
                    change,
                });
            }
        }
    }
    combos
}
