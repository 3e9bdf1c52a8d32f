use dioxus::prelude::*;
use shared_types::ResultRecord;

use super::HighlightedText;

/// One search result: linked title, author and description.
#[component]
pub fn ResultItem(record: ResultRecord) -> Element {
    let uri = record.uri().to_string();
    let title = record.title().to_string();
    let author = record.author().to_string();
    let description = record.description().map(str::to_string);

    rsx! {
        div { class: "container result-item",
            a { href: "{uri}",
                HighlightedText { text: title }
            }
            p { class: "result-author", "{author}" }
            if let Some(description) = description {
                HighlightedText { text: description }
            }
        }
    }
}

/// Search results in backend order.
#[component]
pub fn ResultList(results: Vec<ResultRecord>, query_id: u64) -> Element {
    rsx! {
        div { class: "container result-list", "data-query-id": "{query_id}",
            for record in results {
                div { class: "row", key: "{record.key()}",
                    ResultItem { record: record.clone() }
                }
            }
        }
    }
}
