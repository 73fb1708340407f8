//! Day-based streak tracking over the settings document.
//!
//! [`ProgressSettings`] is an explicit value read from and written back to
//! `settings.json`; nothing in here touches disk. Every field is
//! independently optional on disk so older documents keep loading.

use crate::world::THEME_NAMES;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which activity a streak counter tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakKind {
    Mission,
    Reflection,
}

/// The flat settings singleton: active theme, daily-lore gate, and one
/// streak counter plus last-activity date per [`StreakKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Calendar date the daily lore line was last shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_lore_date: Option<NaiveDate>,

    #[serde(default)]
    pub mission_streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_mission_date: Option<NaiveDate>,

    #[serde(default)]
    pub reflection_streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reflection_date: Option<NaiveDate>,
}

impl ProgressSettings {
    /// Record one qualifying event on `today` and return the updated streak.
    ///
    /// Same-day repeats leave the counter untouched, a consecutive day
    /// extends it, and any gap (or no prior activity) restarts it at one.
    pub fn record_activity(&mut self, kind: StreakKind, today: NaiveDate) -> u32 {
        let (streak, last) = match kind {
            StreakKind::Mission => (&mut self.mission_streak, &mut self.last_mission_date),
            StreakKind::Reflection => {
                (&mut self.reflection_streak, &mut self.last_reflection_date)
            }
        };
        match *last {
            Some(date) if date == today => {}
            Some(date) if date.succ_opt() == Some(today) => *streak += 1,
            _ => *streak = 1,
        }
        *last = Some(today);
        *streak
    }

    pub fn streak(&self, kind: StreakKind) -> u32 {
        match kind {
            StreakKind::Mission => self.mission_streak,
            StreakKind::Reflection => self.reflection_streak,
        }
    }

    /// Advance the active theme through the fixed set, wrapping around.
    pub fn cycle_theme(&mut self) -> &str {
        let current = self.theme.as_deref().unwrap_or(THEME_NAMES[0]);
        let next = THEME_NAMES
            .iter()
            .position(|name| *name == current)
            .map(|i| THEME_NAMES[(i + 1) % THEME_NAMES.len()])
            .unwrap_or(THEME_NAMES[0]);
        self.theme = Some(next.to_string());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_first_event_starts_streak_at_one() {
        let mut settings = ProgressSettings::default();
        assert_eq!(
            settings.record_activity(StreakKind::Mission, date("2024-05-01")),
            1
        );
        assert_eq!(settings.last_mission_date, Some(date("2024-05-01")));
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let mut settings = ProgressSettings::default();
        settings.record_activity(StreakKind::Mission, date("2024-05-01"));
        settings.record_activity(StreakKind::Mission, date("2024-05-01"));
        assert_eq!(settings.mission_streak, 1);
    }

    #[test]
    fn test_consecutive_days_extend_streak() {
        let mut settings = ProgressSettings::default();
        settings.record_activity(StreakKind::Reflection, date("2024-05-01"));
        settings.record_activity(StreakKind::Reflection, date("2024-05-02"));
        assert_eq!(settings.reflection_streak, 2);
    }

    #[test]
    fn test_gap_resets_streak() {
        let mut settings = ProgressSettings::default();
        settings.record_activity(StreakKind::Mission, date("2024-05-01"));
        settings.record_activity(StreakKind::Mission, date("2024-05-03"));
        assert_eq!(settings.mission_streak, 1);
        assert_eq!(settings.last_mission_date, Some(date("2024-05-03")));
    }

    #[test]
    fn test_streak_extends_across_month_boundary() {
        let mut settings = ProgressSettings::default();
        settings.record_activity(StreakKind::Mission, date("2024-04-30"));
        settings.record_activity(StreakKind::Mission, date("2024-05-01"));
        assert_eq!(settings.mission_streak, 2);
    }

    #[test]
    fn test_counters_are_independent() {
        let mut settings = ProgressSettings::default();
        settings.record_activity(StreakKind::Mission, date("2024-05-01"));
        settings.record_activity(StreakKind::Mission, date("2024-05-02"));
        settings.record_activity(StreakKind::Reflection, date("2024-05-02"));
        assert_eq!(settings.streak(StreakKind::Mission), 2);
        assert_eq!(settings.streak(StreakKind::Reflection), 1);
    }

    #[test]
    fn test_settings_load_from_empty_object() {
        let settings: ProgressSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ProgressSettings::default());
    }

    #[test]
    fn test_settings_round_trip_with_dates() {
        let mut settings = ProgressSettings::default();
        settings.record_activity(StreakKind::Mission, date("2024-05-01"));
        settings.theme = Some("nebula".to_string());
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let back: ProgressSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_cycle_theme_wraps_around() {
        let mut settings = ProgressSettings::default();
        assert_eq!(settings.cycle_theme(), "stardust");
        assert_eq!(settings.cycle_theme(), "nebula");
        assert_eq!(settings.cycle_theme(), "aurora");
        assert_eq!(settings.cycle_theme(), "default");
    }

    #[test]
    fn test_cycle_theme_from_unknown_name_resets() {
        let mut settings = ProgressSettings {
            theme: Some("plasma".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.cycle_theme(), "default");
    }
}
