use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::routes::guard::redirect_target;
use crate::system::auth::context::use_session;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get().trim().to_string();
        let password_val = password.get();
        if username_val.is_empty() || password_val.is_empty() {
            set_error_message.set(Some("请输入用户名和密码".to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        let redirect = session
            .location()
            .get_untracked()
            .split_once('?')
            .and_then(|(_, query)| redirect_target(query));

        spawn_local(async move {
            if let Err(e) = session.login(username_val, password_val, redirect).await {
                set_error_message.set(Some(format!("登录失败：{}", e)));
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"GVB Admin"</h1>
                <h2>"博客后台管理系统"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"用户名"</label>
                        <input
                            type="text"
                            id="username"
                            placeholder="admin"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"密码"</label>
                        <input
                            type="password"
                            id="password"
                            placeholder="123456"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "登录中..." } else { "登录" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
