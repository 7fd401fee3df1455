pub mod sidebar;
pub mod top_header;

use leptos::prelude::*;
use sidebar::Sidebar;
use top_header::TopHeader;

/// Page frame of every signed-in route.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                    |
/// +------------------------------------------+
/// |  Sidebar  |           Content             |
/// +------------------------------------------+
/// ```
#[component]
pub fn AdminLayout(children: Children) -> impl IntoView {
    let collapsed = RwSignal::new(false);

    view! {
        <div class="app-layout">
            <TopHeader collapsed=collapsed />
            <div class="app-body">
                <aside class="left" class:collapsed=move || collapsed.get()>
                    <Sidebar collapsed=collapsed />
                </aside>
                <main class="app-main">{children()}</main>
            </div>
        </div>
    }
}
