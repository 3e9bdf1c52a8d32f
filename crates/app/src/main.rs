use client::SearchClient;
use dioxus::prelude::*;
use shared_types::ClientConfig;

mod components;
use components::SearchForm;

fn main() {
    client::config::load_config();
    dioxus::launch(App);
}

/// Browser builds have no environment at runtime; a base URL baked in at
/// compile time wins over the loaded config.
fn browser_override(config: &ClientConfig) -> ClientConfig {
    match option_env!("SEARCH_API_URL") {
        Some(url) if !url.is_empty() => ClientConfig {
            base_url: url.to_string(),
            ..config.clone()
        },
        _ => config.clone(),
    }
}

#[component]
fn App() -> Element {
    use_context_provider(|| {
        let config = browser_override(client::config::client_config());
        SearchClient::from_config(&config)
    });

    rsx! {
        nav { class: "navbar navbar-default",
            div { class: "container-fluid",
                div { class: "navbar-header",
                    a { class: "navbar-brand", "Thesis Search" }
                }
            }
        }
        div { class: "container-fluid",
            SearchForm {}
        }
    }
}
