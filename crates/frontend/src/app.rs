use leptos::ev;
use leptos::prelude::*;

use crate::config::{load_config, AppConfig};
use crate::routes::views::render_route;
use crate::shared::dialog::{DialogHost, DialogService};
use crate::shared::notify::{MessageHost, NotificationService};
use crate::system::auth::context::Session;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config().unwrap_or_else(|err| {
        log::error!("invalid embedded config, using defaults: {}", err);
        AppConfig::default()
    });
    log::info!(
        "starting admin client (api {}, back_router {})",
        config.api.base_api,
        config.router.back_router
    );

    let notify = NotificationService::new();
    let dialog = DialogService::new();
    let session = Session::new(config, notify, dialog);
    provide_context(notify);
    provide_context(dialog);
    provide_context(session);

    session.init_persistence();
    session.sync_with_location();
    let popstate = window_event_listener(ev::popstate, move |_| session.sync_with_location());
    on_cleanup(move || popstate.remove());

    view! {
        {move || session.current().get().map(|found| render_route(&found))}
        <MessageHost />
        <DialogHost />
    }
}
