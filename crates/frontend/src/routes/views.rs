//! View factories behind the route `component` keys.

use leptos::prelude::*;

use super::record::{RouteMeta, ViewKey};
use super::registry;
use super::table::RouteMatch;
use crate::layout::AdminLayout;
use crate::pages::category::CategoryPage;
use crate::pages::home::HomePage;
use crate::pages::module::ModulePage;
use crate::pages::not_found::NotFoundPage;
use crate::system::pages::login::LoginPage;

/// Render a matched route: outer views wrap the inner ones.
pub fn render_route(found: &RouteMatch) -> AnyView {
    render_chain(&found.views, &found.meta)
}

fn render_chain(views: &[ViewKey], meta: &RouteMeta) -> AnyView {
    match views.split_first() {
        None => ().into_any(),
        Some((first, rest)) if first.is_layout() => {
            let inner = render_chain(rest, meta);
            view! { <AdminLayout>{inner}</AdminLayout> }.into_any()
        }
        Some((first, _)) => render_view(first, meta),
    }
}

fn render_view(key: &ViewKey, meta: &RouteMeta) -> AnyView {
    match key.as_str() {
        "login" => view! { <LoginPage /> }.into_any(),
        "not_found" => view! { <NotFoundPage /> }.into_any(),
        "home" => view! { <HomePage /> }.into_any(),
        "article/category" => view! { <CategoryPage /> }.into_any(),
        other => {
            if !registry::is_known_view(key) {
                log::warn!("no view registered for {:?}", other);
            }
            view! { <ModulePage title=meta.title.clone() view_key=other.to_string() /> }.into_any()
        }
    }
}
