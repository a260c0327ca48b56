//! Customisation detection from configuration choices across users.
//!
//! If most users change a setting to the same value, that value is a good
//! candidate for a global preset. The detector works in two explicit stages:
//!
//! 1. [`UserPreferences::collect`] reduces the raw configuration log to one
//!    preferred value per user for each (screen, setting) pair. A user's
//!    preferred value is the value they chose most often.
//! 2. [`PresetCandidate::from_preferences`] counts the preferred values across
//!    users and reports pairs where a single value is preferred by more than
//!    [`PRESET_COVERAGE_THRESHOLD`] of the users.
//!
//! Pairs at or below the threshold produce nothing. Only when no pair in the
//! whole dataset qualifies does the detector report the pattern as implemented.
//!
//! "Most common" ties are resolved towards the lexically smallest value in both
//! stages.

use std::collections::BTreeMap;

use serde::Serialize;
use uxlens_stats::frequency::FrequencyTable;

use crate::{
    event::ConfigEvent,
    finding::{Finding, FindingStatus, Metrics, Pattern, Subject},
};

/// Share of users that must prefer one value for it to become a preset candidate.
pub const PRESET_COVERAGE_THRESHOLD: f64 = 0.51;

/// Subject label for findings that apply to every user.
pub const ALL_USERS: &str = "ALL";

/// A configurable setting on a screen.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SettingKey {
    pub screen_id: String,
    pub config_key: String,
}

/// Per-user preferred value of every setting (stage 1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserPreferences {
    /// setting -> user -> preferred value
    pub map: BTreeMap<SettingKey, BTreeMap<String, String>>,
}

impl UserPreferences {
    /// Reduces configuration events to each user's preferred value per setting.
    #[must_use]
    pub fn collect(events: &[ConfigEvent]) -> Self {
        let mut choices: BTreeMap<(&str, &str), BTreeMap<&str, FrequencyTable<&str>>> =
            BTreeMap::new();
        for event in events {
            choices
                .entry((event.screen_id.as_str(), event.config_key.as_str()))
                .or_default()
                .entry(event.user_id.as_str())
                .or_default()
                .insert(event.config_value.as_str());
        }
        tracing::debug!(
            events = events.len(),
            settings = choices.len(),
            "grouped configuration events"
        );

        let map = choices
            .into_iter()
            .map(|((screen_id, config_key), users)| {
                let preferred = users
                    .into_iter()
                    .filter_map(|(user_id, table)| {
                        let (value, _) = table.most_common()?;
                        Some((user_id.to_owned(), (*value).to_owned()))
                    })
                    .collect();
                let key = SettingKey {
                    screen_id: screen_id.to_owned(),
                    config_key: config_key.to_owned(),
                };
                (key, preferred)
            })
            .collect();
        Self { map }
    }
}

/// Agreement of users on one setting (stage 2).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetCandidate {
    pub setting: SettingKey,
    /// Value preferred by the most users (lexically smallest on ties).
    pub value: String,
    /// Number of distinct users with a preference for this setting.
    pub users: usize,
    /// Share of users preferring `value`.
    pub coverage: f64,
}

impl PresetCandidate {
    /// Measures agreement on every setting, ordered by (screen, key).
    #[must_use]
    pub fn from_preferences(preferences: &UserPreferences) -> Vec<Self> {
        preferences
            .map
            .iter()
            .filter_map(|(setting, users)| {
                let table = FrequencyTable::new(users.values().map(String::as_str));
                let (value, _) = table.most_common()?;
                Some(Self {
                    setting: setting.clone(),
                    value: (*value).to_owned(),
                    users: table.total(),
                    coverage: table.coverage()?,
                })
            })
            .collect()
    }

    /// Whether a clear majority of users share the preferred value.
    #[must_use]
    pub fn is_preset(&self) -> bool {
        self.coverage > PRESET_COVERAGE_THRESHOLD
    }

    fn finding(&self) -> Finding {
        Finding {
            pattern: Pattern::Customization,
            subject: Subject::Setting {
                users: ALL_USERS.to_owned(),
                screen_id: self.setting.screen_id.clone(),
                config_key: self.setting.config_key.clone(),
            },
            status: FindingStatus::Candidate,
            metrics: Metrics::Preset {
                value: self.value.clone(),
                coverage: self.coverage,
                users: self.users,
            },
            message: "Preset global candidate (≥51% users)".to_owned(),
        }
    }
}

/// Runs the customisation detector over a dataset.
#[must_use]
pub fn detect(events: &[ConfigEvent]) -> Vec<Finding> {
    let preferences = UserPreferences::collect(events);
    classify(&PresetCandidate::from_preferences(&preferences))
}

/// Turns stage-2 agreement figures into findings.
///
/// Returns one candidate finding per preset, or a single implemented finding
/// if no setting qualifies.
#[must_use]
pub fn classify(candidates: &[PresetCandidate]) -> Vec<Finding> {
    let findings = candidates
        .iter()
        .filter(|candidate| candidate.is_preset())
        .map(PresetCandidate::finding)
        .collect::<Vec<_>>();

    if findings.is_empty() {
        vec![Finding::implemented(Pattern::Customization)]
    } else {
        findings
    }
}

#[cfg(test)]
#[expect(clippy::float_cmp)]
mod tests {
    use super::*;

    fn config(user: &str, screen: &str, key: &str, value: &str) -> ConfigEvent {
        ConfigEvent {
            user_id: user.to_owned(),
            screen_id: screen.to_owned(),
            config_key: key.to_owned(),
            config_value: value.to_owned(),
        }
    }

    fn theme_events(values: &[&str]) -> Vec<ConfigEvent> {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| config(&format!("u{i:02}"), "settings", "theme", value))
            .collect()
    }

    fn theme() -> SettingKey {
        SettingKey {
            screen_id: "settings".to_owned(),
            config_key: "theme".to_owned(),
        }
    }

    fn theme_of<'a>(prefs: &'a UserPreferences, user_id: &str) -> Option<&'a str> {
        prefs.map.get(&theme())?.get(user_id).map(String::as_str)
    }

    #[test]
    fn test_user_preference_is_most_frequent_choice() {
        let events = [
            config("u1", "settings", "theme", "light"),
            config("u1", "settings", "theme", "dark"),
            config("u1", "settings", "theme", "dark"),
            config("u2", "settings", "theme", "light"),
            config("u1", "editor", "font", "mono"),
        ];
        let prefs = UserPreferences::collect(&events);
        assert_eq!(prefs.map.len(), 2);
        assert_eq!(theme_of(&prefs, "u1"), Some("dark"));
        assert_eq!(theme_of(&prefs, "u2"), Some("light"));
        assert_eq!(theme_of(&prefs, "u3"), None);
    }

    #[test]
    fn test_user_preference_tie_picks_lexically_smallest() {
        let events = [
            config("u1", "settings", "theme", "light"),
            config("u1", "settings", "theme", "dark"),
        ];
        let prefs = UserPreferences::collect(&events);
        assert_eq!(theme_of(&prefs, "u1"), Some("dark"));
    }

    #[test]
    fn test_majority_preference_is_preset_candidate() {
        let events = theme_events(&[
            "dark", "dark", "dark", "dark", "dark", "dark", "light", "light", "blue", "sepia",
        ]);
        let findings = detect(&events);
        assert_eq!(findings.len(), 1);

        let finding = &findings[0];
        assert_eq!(finding.status, FindingStatus::Candidate);
        assert_eq!(
            finding.subject,
            Subject::Setting {
                users: "ALL".to_owned(),
                screen_id: "settings".to_owned(),
                config_key: "theme".to_owned(),
            }
        );
        let Metrics::Preset {
            value,
            coverage,
            users,
        } = &finding.metrics
        else {
            panic!("expected preset metrics, got {:?}", finding.metrics);
        };
        assert_eq!(value, "dark");
        assert_eq!(*users, 10);
        assert!((coverage - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_even_split_is_not_a_candidate() {
        let events = theme_events(&["dark", "light", "dark", "light"]);
        let candidates = PresetCandidate::from_preferences(&UserPreferences::collect(&events));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].coverage, 0.5);
        assert!(!candidates[0].is_preset());

        assert_eq!(
            detect(&events),
            vec![Finding::implemented(Pattern::Customization)]
        );
    }

    #[test]
    fn test_coverage_counts_users_not_events() {
        // u1 flips "dark" many times but still counts once
        let mut events = vec![config("u1", "settings", "theme", "dark"); 20];
        events.push(config("u2", "settings", "theme", "light"));
        events.push(config("u3", "settings", "theme", "light"));

        let candidates = PresetCandidate::from_preferences(&UserPreferences::collect(&events));
        let candidate = &candidates[0];
        assert_eq!(candidate.users, 3);
        assert_eq!(candidate.value, "light");
        assert!((candidate.coverage - 2.0 / 3.0).abs() < 1e-12);
        assert!(candidate.is_preset());
    }

    #[test]
    fn test_only_qualifying_settings_are_reported() {
        let mut events = theme_events(&["dark", "dark", "dark", "light"]);
        events.extend([
            config("u1", "editor", "font", "mono"),
            config("u2", "editor", "font", "serif"),
        ]);
        let findings = detect(&events);
        assert_eq!(findings.len(), 1);
        assert!(matches!(
            &findings[0].subject,
            Subject::Setting { screen_id, .. } if screen_id == "settings"
        ));
    }

    #[test]
    fn test_threshold_is_strict() {
        // 51 of 100 users is exactly the threshold
        let values = (0..100)
            .map(|i| if i < 51 { "on" } else { "off" })
            .collect::<Vec<_>>();
        let events = theme_events(&values);
        let candidates = PresetCandidate::from_preferences(&UserPreferences::collect(&events));
        assert_eq!(candidates[0].coverage, 0.51);
        assert!(!candidates[0].is_preset());
    }

    #[test]
    fn test_detect_is_idempotent() {
        let mut events = theme_events(&["dark", "dark", "light"]);
        events.push(config("u00", "editor", "font", "mono"));
        let first = detect(&events);
        assert_eq!(first.len(), 2);
        assert_eq!(detect(&events), first);
    }

    #[test]
    fn test_empty_dataset_is_implemented() {
        assert_eq!(
            detect(&[]),
            vec![Finding::implemented(Pattern::Customization)]
        );
        assert!(UserPreferences::collect(&[]).map.is_empty());
    }
}
