use leptos::prelude::*;

use crate::system::auth::context::use_session;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="page page-404">
            <h1>"404"</h1>
            <p>"抱歉，您访问的页面不存在。"</p>
            <button class="btn-primary" on:click=move |_| session.navigate("/")>"返回首页"</button>
        </div>
    }
}
