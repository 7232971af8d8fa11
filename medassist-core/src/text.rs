pub const IMAGE_EXPLANATION_PREFIX: &str = "Diagram Explanation: ";
pub const IMAGE_EXPLANATION_DEFAULT: &str = "See diagram below.";

/// Trims user input. Blank input yields `None` and must not be sent anywhere.
pub fn normalize_input(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn image_query_or_fallback(raw: &str, fallback: &str) -> String {
    normalize_input(raw).unwrap_or_else(|| fallback.to_string())
}

pub fn format_image_explanation(explanation: Option<&str>) -> String {
    let body = explanation
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(IMAGE_EXPLANATION_DEFAULT);
    format!("{IMAGE_EXPLANATION_PREFIX}{body}")
}
