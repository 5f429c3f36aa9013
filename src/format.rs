use crate::model::Range;

pub const PLAYERS_GLYPH: &str = "👥";
pub const TIME_GLYPH: &str = "⏱";

/// `"👥 4"` for a fixed count, `"👥 2–5"` for a range, empty when unknown.
pub fn format_players(players: Option<&Range>) -> String {
    match players {
        None => String::new(),
        Some(r) if r.is_single() => format!("{PLAYERS_GLYPH} {}", r.min),
        Some(r) => format!("{PLAYERS_GLYPH} {}–{}", r.min, r.max),
    }
}

/// Same shape as [`format_players`] with a trailing minutes unit.
pub fn format_time(time: Option<&Range>, unit: &str) -> String {
    match time {
        None => String::new(),
        Some(r) if r.is_single() => format!("{TIME_GLYPH} {} {unit}", r.min),
        Some(r) => format!("{TIME_GLYPH} {}–{} {unit}", r.min, r.max),
    }
}

/// Tags to badge, in order. Duplicates are kept.
pub fn tag_badges(tags: Option<&[String]>) -> Vec<String> {
    tags.map(|t| t.to_vec()).unwrap_or_default()
}

pub fn join_systems(systems: &[String]) -> String {
    systems.join(", ")
}
