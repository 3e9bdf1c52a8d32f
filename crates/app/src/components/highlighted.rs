use dioxus::prelude::*;
use shared_types::highlight;

/// Paragraph of backend-highlighted text, emphasized runs rendered bold.
/// Renders nothing for empty text.
#[component]
pub fn HighlightedText(text: String) -> Element {
    let runs = highlight::parse(Some(&text));
    if runs.is_empty() {
        return rsx! {};
    }

    rsx! {
        p {
            for run in runs {
                if run.emphasized {
                    b { "{run.text}" }
                } else {
                    "{run.text}"
                }
            }
        }
    }
}
