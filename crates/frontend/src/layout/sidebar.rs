//! Sidebar menu built from the live route table.

use leptos::prelude::*;

use crate::routes::record::{join_path, RouteRecord};
use crate::system::auth::context::use_session;

/// One clickable sidebar entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub name: String,
    pub title: String,
    pub icon: Option<String>,
    pub path: String,
    pub children: Vec<MenuItem>,
}

/// Menu items of the visible routes.
///
/// A catalogue root with a single visible child is shown as that child.
pub fn menu_items(menus: &[RouteRecord]) -> Vec<MenuItem> {
    menus.iter().filter_map(|r| menu_item(r, "")).collect()
}

fn menu_item(route: &RouteRecord, parent_path: &str) -> Option<MenuItem> {
    if route.is_hidden {
        return None;
    }
    let path = join_path(parent_path, &route.path);
    let mut children: Vec<RouteRecord> = route.children.iter().filter(|c| !c.is_hidden).cloned().collect();
    children.sort_by_key(|c| c.meta.order);

    if route.is_catalogue && children.len() == 1 {
        return menu_item(&children[0], &path);
    }

    let title = if route.meta.title.is_empty() {
        route.name.clone()
    } else {
        route.meta.title.clone()
    };
    Some(MenuItem {
        name: route.name.clone(),
        title,
        icon: route.meta.icon.clone(),
        children: children.iter().filter_map(|c| menu_item(c, &path)).collect(),
        path,
    })
}

#[component]
pub fn Sidebar(collapsed: RwSignal<bool>) -> impl IntoView {
    let session = use_session();
    let items = move || menu_items(&session.guard.menus());
    let active = move || session.current().get().map(|m| m.name).unwrap_or_default();

    let entry = move |item: MenuItem| {
        let MenuItem { name, title, icon, path, .. } = item;
        let label = title.clone();
        view! {
            <li
                class="sidebar__item"
                class:active=move || active() == name
                on:click=move |_| session.navigate(path.clone())
                title=title
            >
                <span class="sidebar__icon" data-icon=icon.unwrap_or_default()></span>
                <Show when=move || !collapsed.get()>
                    <span class="sidebar__label">{label.clone()}</span>
                </Show>
            </li>
        }
    };

    view! {
        <nav class="sidebar">
            <ul>
                {move || {
                    items()
                        .into_iter()
                        .map(|group| {
                            if group.children.is_empty() {
                                entry(group).into_any()
                            } else {
                                view! {
                                    <li class="sidebar__group">
                                        <div class="sidebar__group-title">{group.title.clone()}</div>
                                        <ul>{group.children.into_iter().map(entry).collect_view()}</ul>
                                    </li>
                                }
                                    .into_any()
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::registry::route_modules;

    #[test]
    fn test_menu_items_from_registry() {
        let items = menu_items(&route_modules());
        assert_eq!(items[0].name, "HomePage");
        assert_eq!(items[0].path, "/home");
        assert_eq!(items[0].title, "首页");

        let article = items.iter().find(|i| i.name == "Article").unwrap();
        let paths: Vec<&str> = article.children.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/article/write", "/article/list", "/article/category", "/article/tag"]
        );
        assert!(items.iter().all(|i| i.name != "Profile"));
    }
}
