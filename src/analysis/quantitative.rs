//! Detection of quantitative content in analysis text.

/// Terms that suggest measurable content, matched as lowercase substrings.
pub const QUANTITATIVE_INDICATORS: [&str; 14] = [
    "review", "rating", "star", "score", "number", "percent", "%", "count", "total", "average",
    "median", "price", "$", "€",
];

/// Whether `text` mentions any quantitative indicator, ignoring case.
pub fn has_quantitative_content(text: &str) -> bool {
    let lowered = text.to_lowercase();
    QUANTITATIVE_INDICATORS
        .iter()
        .any(|indicator| lowered.contains(indicator))
}
