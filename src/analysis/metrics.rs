//! Numeric metric extraction from free-form analysis text.
//!
//! Four pattern classes are scanned independently and their matches are
//! yielded class by class, left to right within each class. A span that
//! satisfies several classes is reported once per class.

use regex::{CaptureMatches, Regex};
use serde::Serialize;
use std::iter::FusedIterator;
use std::ops::Range;
use std::sync::LazyLock;

/// Characters of surrounding text captured on each side of a match.
pub const DEFAULT_CONTEXT_WINDOW: usize = 20;

/// The pattern class a metric was recognized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// "4.5 stars", "120 reviews", "9 ratings"
    Rating,
    /// "80%", "15 percent"
    Percentage,
    /// "€120", "$ 99.50"
    Currency,
    /// "4 out of 5", "3/5"
    Ratio,
}

/// One quantitative mention found in text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedMetric {
    pub kind: MetricKind,
    /// The matched substring, verbatim.
    pub value: String,
    /// The numbers captured inside the match, in order.
    pub figures: Vec<String>,
    /// Up to the context window of characters before and after the match.
    pub context: String,
    /// Byte range of the match in the scanned text.
    pub span: Range<usize>,
}

static METRIC_PATTERNS: LazyLock<[(MetricKind, Regex); 4]> = LazyLock::new(|| {
    [
        (
            MetricKind::Rating,
            Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:reviews?|ratings?|stars?)").unwrap(),
        ),
        (
            MetricKind::Percentage,
            Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:%|percent)").unwrap(),
        ),
        (
            MetricKind::Currency,
            Regex::new(r"(?i)(?:€|£|\$)\s*(\d+(?:\.\d+)?)").unwrap(),
        ),
        (
            MetricKind::Ratio,
            Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:out of|/)\s*(\d+(?:\.\d+)?)").unwrap(),
        ),
    ]
});

/// Scan `text` for quantitative mentions.
///
/// The returned iterator is lazy and single-pass; collect it to keep the
/// results. Text without matches yields nothing.
///
/// # Example
/// ```rust
/// use agentdeck::analysis::metrics::{extract_metrics, MetricKind};
///
/// let metrics: Vec<_> = extract_metrics("4.5 stars, €120, 3/5").collect();
/// assert_eq!(metrics.len(), 3);
/// assert_eq!(metrics[0].kind, MetricKind::Rating);
/// assert_eq!(metrics[1].figures, vec!["120"]);
/// assert_eq!(metrics[2].value, "3/5");
/// ```
pub fn extract_metrics(text: &str) -> Metrics<'_> {
    Metrics {
        text,
        window: DEFAULT_CONTEXT_WINDOW,
        next_class: 0,
        current: None,
    }
}

/// Iterator over the metrics found in a piece of text.
pub struct Metrics<'t> {
    text: &'t str,
    window: usize,
    next_class: usize,
    current: Option<(MetricKind, CaptureMatches<'static, 't>)>,
}

impl<'t> Metrics<'t> {
    /// Change how many characters of context are captured around each match.
    pub fn with_context_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }
}

impl Iterator for Metrics<'_> {
    type Item = ExtractedMetric;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((kind, matches)) = self.current.as_mut() {
                if let Some(caps) = matches.next() {
                    let whole = caps.get(0)?;
                    let figures = caps
                        .iter()
                        .skip(1)
                        .flatten()
                        .map(|m| m.as_str().to_string())
                        .collect();
                    return Some(ExtractedMetric {
                        kind: *kind,
                        value: whole.as_str().to_string(),
                        figures,
                        context: context_around(self.text, whole.range(), self.window).to_string(),
                        span: whole.range(),
                    });
                }
                self.current = None;
            }

            let (kind, pattern) = METRIC_PATTERNS.get(self.next_class)?;
            self.next_class += 1;
            self.current = Some((*kind, pattern.captures_iter(self.text)));
        }
    }
}

impl FusedIterator for Metrics<'_> {}

/// Slice of `text` covering `span` plus up to `window` characters on each
/// side, clamped to the text bounds.
fn context_around(text: &str, span: Range<usize>, window: usize) -> &str {
    let start = if window == 0 {
        span.start
    } else {
        text[..span.start]
            .char_indices()
            .rev()
            .nth(window - 1)
            .map(|(i, _)| i)
            .unwrap_or(0)
    };
    let end = text[span.end..]
        .char_indices()
        .nth(window)
        .map(|(i, _)| span.end + i)
        .unwrap_or(text.len());
    &text[start..end]
}
