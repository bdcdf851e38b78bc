use crate::types::ThemeTag;

/// Icon codes ending in this character are night variants (`01n`, `10n`, ...).
pub const NIGHT_MARKER: char = 'n';

/// Pick the theme for a condition. First match wins; night overrides everything.
pub fn select_theme(condition: &str, icon_code: &str) -> ThemeTag {
    if icon_code.ends_with(NIGHT_MARKER) {
        return ThemeTag::Night;
    }

    let condition = condition.to_lowercase();
    if condition.contains("clear") {
        ThemeTag::Sunny
    } else if condition.contains("cloud") {
        ThemeTag::Cloudy
    } else if ["rain", "drizzle", "thunder"]
        .iter()
        .any(|needle| condition.contains(needle))
    {
        ThemeTag::Rainy
    } else if condition.contains("snow") {
        ThemeTag::Snow
    } else {
        ThemeTag::Cloudy
    }
}
