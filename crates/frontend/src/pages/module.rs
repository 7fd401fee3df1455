use leptos::prelude::*;

/// Page of a registered module without a dedicated screen in this client.
#[component]
pub fn ModulePage(title: String, view_key: String) -> impl IntoView {
    view! {
        <div class="page page-module">
            <h2>{title}</h2>
            <p class="page-module__key">{view_key}</p>
        </div>
    }
}
