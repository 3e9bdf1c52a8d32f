use client::{SearchClient, SearchController, SearchTicket};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdSearch;
use dioxus_free_icons::Icon;
use shared_types::CoreType;

use super::ResultList;

/// Label for a core name in the filter dropdown.
fn core_label(name: &str) -> String {
    CoreType::from_name(name)
        .map(|core| core.label().to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Search input, core filter, status message and results.
///
/// All query and result state lives in one `SearchController`; handlers
/// only forward input to it and dispatch the tickets it hands out.
#[component]
pub fn SearchForm() -> Element {
    let client = use_context::<SearchClient>();
    let mut controller = use_signal(SearchController::new);
    let mut cores: Signal<Vec<String>> = use_signal(Vec::new);

    let cores_client = client.clone();
    use_future(move || {
        let client = cores_client.clone();
        async move {
            match client.cores().await {
                Ok(names) => cores.set(names),
                Err(e) => tracing::warn!(error = %e, "failed to load core list"),
            }
        }
    });

    // Requests run detached; the controller drops completions that are no
    // longer current.
    let dispatch = move |ticket: Option<SearchTicket>| {
        if let Some(ticket) = ticket {
            let client = client.clone();
            spawn(async move {
                let completion = ticket.dispatch(&client).await;
                controller.write().apply(completion);
            });
        }
    };
    let dispatch_for_enter = dispatch.clone();
    let dispatch_for_btn = dispatch.clone();

    let session = controller.read().session().clone();
    let message = session.message();
    let core_filter = controller.read().core_filter().unwrap_or_default().to_string();
    let core_names = cores.read().clone();
    let results = session.results().to_vec();

    rsx! {
        div { class: "input-group",
            div { class: "input-group add-on",
                input {
                    id: "search-input",
                    class: "form-control",
                    r#type: "text",
                    placeholder: "Search keywords...",
                    value: "{session.query_text()}",
                    oninput: move |e: FormEvent| {
                        controller.write().set_query(e.value());
                    },
                    onkeydown: move |e: KeyboardEvent| {
                        let ticket = controller.write().key_event(&e.key().to_string());
                        dispatch_for_enter(ticket);
                    },
                }
                select {
                    class: "form-control core-filter",
                    value: "{core_filter}",
                    onchange: move |e: FormEvent| {
                        controller.write().set_core_filter(Some(e.value()));
                    },
                    option { value: "", "All collections" }
                    for name in core_names {
                        option { key: "{name}", value: "{name}", "{core_label(&name)}" }
                    }
                }
                div { class: "input-group-btn",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            let ticket = controller.write().submit();
                            dispatch_for_btn(ticket);
                        },
                        Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
                    }
                }
            }
            if let Some(message) = message {
                h4 { class: "search-message", "{message.text()}" }
            }
            ResultList { results, query_id: session.query_id() }
        }
    }
}
