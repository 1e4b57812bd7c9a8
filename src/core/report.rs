//! Report formatting.
//!
//! Renders rankings, menus and log entries as plain text for chat replies. The bars
//! stand in for a chart: each meal's bar is scaled against the most picked meal.

use crate::core::{
    model::{ActivityLog, DailyMenu, LogCategory},
    ranking::SelectionSummary,
};
use chrono::Local;
use std::fmt::{self, Write};

/// Generates a bar for one ranking row.
///
/// Creates a text bar like: `[██████░░░░] 3`
///
/// # Arguments
/// * `count` - Picks for this meal
/// * `max` - Picks for the most popular meal
/// * `bar_length` - Length of the bar in characters (default 10)
#[must_use]
pub fn format_count_bar(count: usize, max: usize, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let filled = if max == 0 {
        0
    } else {
        // Round to nearest; count <= max keeps this within `length`
        (count.min(max) * length + max / 2) / max
    };
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {count}")
}

/// "1 pick" / "3 picks".
#[must_use]
pub fn format_picks(count: usize) -> String {
    if count == 1 {
        "1 pick".to_string()
    } else {
        format!("{count} picks")
    }
}

/// Formats the ranking with bars and the order total in at most `max_chars`
/// characters.
///
/// Rows that do not fit are replaced by a single "… and N more" line; the total is
/// always kept.
pub fn format_ranking(
    summary: &SelectionSummary,
    max_chars: usize,
) -> Result<String, fmt::Error> {
    let rows = &summary.ranking;
    let max = summary.max_count();
    let width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0);

    let footer = format!("Total orders: {}", summary.total_orders);
    let mut budget = max_chars.saturating_sub(footer.chars().count());

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let line = format!(
            "{:>2}. {:<width$}  {}",
            i + 1,
            row.name,
            format_count_bar(row.count, max, Some(10))
        );
        let needed = line.chars().count() + 1;
        let after = rows.len() - i - 1;
        let reserve = if after == 0 {
            0
        } else {
            more_rows_line(after).chars().count() + 1
        };

        if needed + reserve > budget {
            writeln!(&mut out, "{}", more_rows_line(rows.len() - i))?;
            break;
        }
        writeln!(&mut out, "{line}")?;
        budget -= needed;
    }
    out.push_str(&footer);
    Ok(out)
}

fn more_rows_line(count: usize) -> String {
    format!("… and {count} more")
}

/// Wraps the ranking in a titled code block that fits in `max_chars` characters.
pub fn format_summary_message(
    summary: &SelectionSummary,
    max_chars: usize,
) -> Result<String, fmt::Error> {
    const HEADER: &str = "📊 **Selection Summary**\n```\n";
    const FOOTER: &str = "\n```";

    let overhead = HEADER.chars().count() + FOOTER.chars().count();
    let table = format_ranking(summary, max_chars.saturating_sub(overhead))?;
    Ok(format!("{HEADER}{table}{FOOTER}"))
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate_message(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Icon shown next to a log entry.
#[must_use]
pub const fn log_icon(category: LogCategory) -> &'static str {
    match category {
        LogCategory::Upload => "📥",
        LogCategory::Selection => "✅",
        LogCategory::Deletion => "🗑️",
    }
}

/// Formats a log entry as `icon HH:MM actor: message` in local time.
#[must_use]
pub fn format_log_entry(entry: &ActivityLog) -> String {
    let time = entry.timestamp.with_timezone(&Local).format("%H:%M");
    format!(
        "{} `{time}` **{}**: {}",
        log_icon(entry.category),
        entry.actor,
        entry.message
    )
}

/// Formats the menu as a numbered list with categories and descriptions.
pub fn format_menu(menu: &DailyMenu) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(&mut out, "🍽️ **Menu for {}**\n", menu.date.format("%Y-%m-%d"))?;
    for (i, meal) in menu.meals.iter().enumerate() {
        write!(&mut out, "{}. **{}**", i + 1, meal.name)?;
        if let Some(category) = &meal.category {
            write!(&mut out, " _({category})_")?;
        }
        if let Some(description) = &meal.description {
            write!(&mut out, " - {description}")?;
        }
        writeln!(&mut out)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{model::Meal, ranking},
        test_utils::{meal_ids, menu_of, selection_of},
    };
    use chrono::Utc;

    const DISCORD_LIMIT: usize = 2000;

    #[test]
    fn test_format_count_bar_full() {
        assert_eq!(format_count_bar(4, 4, Some(10)), "[██████████] 4");
    }

    #[test]
    fn test_format_count_bar_half() {
        assert_eq!(format_count_bar(2, 4, Some(10)), "[█████░░░░░] 2");
    }

    #[test]
    fn test_format_count_bar_zero() {
        assert_eq!(format_count_bar(0, 4, Some(10)), "[░░░░░░░░░░] 0");
    }

    #[test]
    fn test_format_count_bar_no_picks_at_all() {
        assert_eq!(format_count_bar(0, 0, None), "[░░░░░░░░░░] 0");
    }

    #[test]
    fn test_format_picks() {
        assert_eq!(format_picks(1), "1 pick");
        assert_eq!(format_picks(0), "0 picks");
        assert_eq!(format_picks(7), "7 picks");
    }

    #[test]
    fn test_format_ranking_lists_every_meal_in_order() {
        let menu = menu_of(&["Soup", "Cake"]);
        let selections = vec![selection_of("Alice", meal_ids(&menu, &[1]))];
        let summary = ranking::summarize(Some(&menu), &selections, 1);

        let text = format_ranking(&summary, DISCORD_LIMIT).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Cake"));
        assert!(lines[0].ends_with("[██████████] 1"));
        assert!(lines[1].contains("Soup"));
        assert_eq!(lines[2], "Total orders: 1");
    }

    #[test]
    fn test_summary_message_fits_discord_limit_on_long_menu() {
        let names: Vec<String> = (1..=70)
            .map(|i| format!("Grilled Chicken Breast {i}"))
            .collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let menu = menu_of(&refs);
        let selections = vec![
            selection_of("Alice", meal_ids(&menu, &[0, 1, 2, 3])),
            selection_of("Bob", meal_ids(&menu, &[0, 1, 2, 69])),
        ];
        let summary = ranking::summarize(Some(&menu), &selections, 5);

        let message = format_summary_message(&summary, DISCORD_LIMIT).unwrap();
        let lines: Vec<&str> = message.lines().collect();

        assert!(message.chars().count() <= DISCORD_LIMIT);
        assert!(message.ends_with("\n```"));
        assert!(lines[2].contains("Grilled Chicken Breast 1 "));
        assert_eq!(lines[lines.len() - 2], "Total orders: 2");
        assert!(lines[lines.len() - 3].starts_with("… and "));
    }

    #[test]
    fn test_format_ranking_keeps_every_row_when_it_fits() {
        let menu = menu_of(&["Soup", "Salad", "Cake"]);
        let summary = ranking::summarize(Some(&menu), &[], 5);

        let text = format_ranking(&summary, DISCORD_LIMIT).unwrap();

        assert_eq!(text.lines().count(), 4);
        assert!(!text.contains("more"));
    }

    #[test]
    fn test_truncate_message() {
        assert_eq!(truncate_message("short", 10), "short");
        assert_eq!(truncate_message("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_message("abcdefghij", 5).chars().count(), 5);
    }

    #[test]
    fn test_format_log_entry() {
        let entry = ActivityLog {
            id: "log-1".to_string(),
            category: LogCategory::Deletion,
            message: "Cleared all data.".to_string(),
            actor: "Admin".to_string(),
            timestamp: Utc::now(),
        };
        let line = format_log_entry(&entry);
        assert!(line.starts_with("🗑️"));
        assert!(line.ends_with("**Admin**: Cleared all data."));
    }

    #[test]
    fn test_format_menu() {
        let mut menu = menu_of(&[]);
        menu.meals = vec![
            Meal::new("Soup").with_category("Starter"),
            Meal::new("Cake").with_description("Chocolate"),
        ];

        let text = format_menu(&menu).unwrap();
        assert!(text.contains("1. **Soup** _(Starter)_"));
        assert!(text.contains("2. **Cake** - Chocolate"));
    }
}
