use serde::{Deserialize, Serialize};

/// Marker the backend places before an emphasized substring.
pub const EMPHASIS_OPEN: &str = "<em>";
/// Marker the backend places after an emphasized substring.
pub const EMPHASIS_CLOSE: &str = "</em>";

/// A contiguous piece of display text, emphasized or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRun {
    pub text: String,
    pub emphasized: bool,
}

impl HighlightRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Split backend-highlighted text into plain and emphasized runs.
///
/// `None` yields no runs. Empty runs are dropped and neighbouring plain runs
/// are merged. An opening marker with no closing marker after it, and a
/// closing marker with no opening marker before it, stay in the output as
/// literal text. Nesting is not recognized: an inner opening marker becomes
/// part of the emphasized text and the outer closing marker is literal.
pub fn parse(text: Option<&str>) -> Vec<HighlightRun> {
    let Some(mut rest) = text else {
        return Vec::new();
    };

    let mut runs = Vec::new();
    while let Some(open) = rest.find(EMPHASIS_OPEN) {
        let inner_start = open + EMPHASIS_OPEN.len();
        let Some(close) = rest[inner_start..].find(EMPHASIS_CLOSE) else {
            break;
        };
        let inner_end = inner_start + close;

        push_plain(&mut runs, &rest[..open]);
        let inner = &rest[inner_start..inner_end];
        if !inner.is_empty() {
            runs.push(HighlightRun::emphasized(inner));
        }
        rest = &rest[inner_end + EMPHASIS_CLOSE.len()..];
    }
    push_plain(&mut runs, rest);

    runs
}

/// Visible text of a run sequence with all emphasis removed.
pub fn plain_text(runs: &[HighlightRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}

fn push_plain(runs: &mut Vec<HighlightRun>, text: &str) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if !last.emphasized => last.text.push_str(text),
        _ => runs.push(HighlightRun::plain(text)),
    }
}
