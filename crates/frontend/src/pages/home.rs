use leptos::prelude::*;

use crate::system::auth::context::use_session;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let nickname = move || session.user.nickname();

    view! {
        <div class="page page-home">
            <h2>{move || format!("欢迎回来，{}", nickname())}</h2>
            <p>"从左侧菜单选择要管理的模块。"</p>
        </div>
    }
}
