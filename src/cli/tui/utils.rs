//! Shared helpers for TUI views

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{ItemId, Priority};

/// Truncates to `max_len` characters, ending in "..." when cut
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Green),
    }
}

pub fn completed_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Moves one step through `ids` from `current`, wrapping at both ends.
///
/// Starts at the first id when nothing is selected or the current id is
/// not in the list.
pub fn step(ids: &[ItemId], current: Option<ItemId>, forward: bool) -> Option<ItemId> {
    if ids.is_empty() {
        return None;
    }
    let position = current.and_then(|id| ids.iter().position(|candidate| *candidate == id));
    let next = match (position, forward) {
        (None, _) => 0,
        (Some(i), true) => (i + 1) % ids.len(),
        (Some(0), false) => ids.len() - 1,
        (Some(i), false) => i - 1,
    };
    ids.get(next).copied()
}

/// Next entry of the category filter cycle: all, then each category in use
pub fn next_category(current: Option<&str>, in_use: &[String]) -> Option<String> {
    match current {
        None => in_use.first().cloned(),
        Some(category) => {
            let position = in_use.iter().position(|c| c == category);
            match position {
                Some(i) => in_use.get(i + 1).cloned(),
                None => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId::new).collect()
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_str("milk", 10), "milk");
        assert_eq!(truncate_str("milk", 4), "milk");
        assert_eq!(truncate_str("", 4), "");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_str("Mountain Landscape", 11), "Mountain...");
        assert_eq!(truncate_str("café au lait", 7), "café...");
    }

    #[test]
    fn step_wraps_both_ways() {
        let list = ids(&[10, 20, 30]);

        assert_eq!(step(&list, Some(ItemId::new(30)), true), Some(ItemId::new(10)));
        assert_eq!(step(&list, Some(ItemId::new(10)), false), Some(ItemId::new(30)));
        assert_eq!(step(&list, Some(ItemId::new(20)), true), Some(ItemId::new(30)));
    }

    #[test]
    fn step_starts_at_first_when_unselected() {
        let list = ids(&[10, 20]);

        assert_eq!(step(&list, None, false), Some(ItemId::new(10)));
        assert_eq!(step(&list, Some(ItemId::new(99)), true), Some(ItemId::new(10)));
        assert_eq!(step(&[], None, true), None);
    }

    #[test]
    fn category_cycle_returns_to_all() {
        let in_use = vec!["nature".to_string(), "art".to_string()];

        let first = next_category(None, &in_use);
        assert_eq!(first.as_deref(), Some("nature"));
        let second = next_category(first.as_deref(), &in_use);
        assert_eq!(second.as_deref(), Some("art"));
        assert_eq!(next_category(second.as_deref(), &in_use), None);
        assert_eq!(next_category(Some("gone"), &in_use), None);
    }
}
