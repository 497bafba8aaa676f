pub const MAX_PLAYER_NAME_LENGTH: usize = 20;

/// Collapses whitespace and truncates; blank names become `fallback`.
pub fn sanitize_player_name(name: &str, fallback: &str) -> String {
    let cleaned = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|ch| !ch.is_control())
        .take(MAX_PLAYER_NAME_LENGTH)
        .collect::<String>();
    if cleaned.is_empty() {
        return fallback.to_string();
    }
    cleaned
}

/// Accepts `#rrggbb` only.
pub fn sanitize_color(color: &str) -> Option<String> {
    let trimmed = color.trim();
    let hex = trimmed.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    Some(trimmed.to_string())
}
