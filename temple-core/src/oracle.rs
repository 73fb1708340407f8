//! Random lore and oracle tip selection.
//!
//! Selection is stateless and uniform; the once-per-day gate for lore lives
//! in [`ProgressSettings`], using the same last-date pattern as streaks.

use crate::streaks::ProgressSettings;
use crate::world::OracleTips;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform pick from a lore pool. `None` when the pool is empty.
pub fn pick_lore<'a, R: Rng>(pool: &'a [String], rng: &mut R) -> Option<&'a str> {
    pool.choose(rng).map(String::as_str)
}

/// Draw the daily lore line, at most once per calendar day.
///
/// Returns `None` when today's line was already shown or the pool is empty.
/// On a successful draw the gate date in `settings` is advanced; the caller
/// persists the settings.
pub fn daily_lore<R: Rng>(
    settings: &mut ProgressSettings,
    pool: &[String],
    rng: &mut R,
    today: NaiveDate,
) -> Option<String> {
    if settings.last_lore_date == Some(today) {
        return None;
    }
    let line = pick_lore(pool, rng)?;
    settings.last_lore_date = Some(today);
    Some(line.to_string())
}

/// Uniform pick from the tip pool registered under `category`.
///
/// `None` when the category is absent or its pool is empty.
pub fn pick_oracle_tip<'a, R: Rng>(
    tips: &'a OracleTips,
    category: &str,
    rng: &mut R,
) -> Option<&'a str> {
    tips.get(category)
        .and_then(|pool| pool.choose(rng))
        .map(String::as_str)
}
