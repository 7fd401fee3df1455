//! Top bar: sidebar toggle, current page title, user and logout.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::system::auth::context::use_session;

#[component]
pub fn TopHeader(collapsed: RwSignal<bool>) -> impl IntoView {
    let session = use_session();

    let title = move || session.current().get().map(|m| m.meta.title).unwrap_or_default();
    let nickname = move || session.user.nickname();
    let logout = move |_| {
        spawn_local(async move {
            session.logout().await;
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| collapsed.update(|c| *c = !*c)
                    title=move || if collapsed.get() { "展开菜单" } else { "折叠菜单" }
                >
                    "☰"
                </button>
                <span class="top-header__title">"博客后台管理"</span>
                <span class="top-header__page">{title}</span>
            </div>
            <div class="top-header__actions">
                <span class="top-header__user" on:click=move |_| session.navigate("/profile")>
                    {nickname}
                </span>
                <button class="top-header__icon-btn" on:click=logout>"退出登录"</button>
            </div>
        </div>
    }
}
