//! Category management: list, search, add/edit modal and (batch) delete.

use std::collections::HashSet;
use std::rc::Rc;

use async_trait::async_trait;
use contracts::blog::category::{CategoryForm, CategoryVo};
use contracts::shared::page::{PageQuery, PageResult};
use contracts::shared::response::ApiResponse;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::crud::{Crud, CrudApi, FormRules, Ids, ModalState, OpenMode};
use crate::shared::http::{ApiError, HttpClient, HttpContext, RequestOptions};
use crate::system::auth::context::use_session;

pub struct CategoryApi<C: HttpContext> {
    client: HttpClient<C>,
}

impl<C: HttpContext> CategoryApi<C> {
    pub fn new(client: HttpClient<C>) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &PageQuery) -> Result<PageResult<CategoryVo>, ApiError> {
        let qs = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.client
            .get_data(&format!("/category/list?{}", qs), RequestOptions::default())
            .await
    }
}

#[async_trait(?Send)]
impl<C: HttpContext> CrudApi<CategoryForm> for CategoryApi<C> {
    async fn create(&self, form: &CategoryForm) -> Result<ApiResponse, ApiError> {
        self.client.post("/category", form, RequestOptions::default()).await
    }

    async fn update(&self, form: &CategoryForm) -> Result<ApiResponse, ApiError> {
        self.client.post("/category", form, RequestOptions::default()).await
    }

    async fn delete(&self, ids: &Ids) -> Result<ApiResponse, ApiError> {
        self.client
            .delete("/category", &ids.to_vec(), RequestOptions::default())
            .await
    }
}

#[derive(Clone, Debug)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub article_count: i64,
    pub created_at: String,
}

impl From<CategoryVo> for CategoryRow {
    fn from(c: CategoryVo) -> Self {
        Self {
            id: c.id,
            name: c.name,
            article_count: c.article_count,
            created_at: c.created_at.map(format_timestamp).unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[component]
pub fn CategoryPage() -> impl IntoView {
    let session = use_session();
    let (rows, set_rows) = signal::<Vec<CategoryRow>>(Vec::new());
    let (total, set_total) = signal(0_i64);
    let (keyword, set_keyword) = signal(String::new());
    let (selected, set_selected) = signal::<HashSet<i64>>(HashSet::new());

    let fetch = move || {
        spawn_local(async move {
            let query = PageQuery {
                keyword: keyword.get_untracked(),
                ..PageQuery::default()
            };
            match CategoryApi::new(session.client()).list(&query).await {
                Ok(page) => {
                    set_total.set(page.total);
                    set_rows.set(page.page_data.into_iter().map(Into::into).collect());
                    set_selected.set(HashSet::new());
                }
                Err(e) => log::error!("failed to load categories: {}", e),
            }
        });
    };

    let crud = Crud::new(
        "分类",
        CategoryForm::default(),
        Rc::new(CategoryApi::new(session.client())),
        Rc::new(session.notify),
        Rc::new(session.dialog),
    )
    .with_rules(FormRules::new().required("name"))
    .on_refresh(move |_| fetch());
    let state = crud.state();
    let form = crud.form();
    let loading = crud.loading();
    let errors = crud.errors();
    let crud = StoredValue::new_local(crud);

    let save = move |_| {
        let crud = crud.get_value();
        spawn_local(async move {
            crud.save().await;
        });
    };
    let remove = move |ids: Ids| {
        let crud = crud.get_value();
        spawn_local(async move {
            crud.delete(ids, true).await;
        });
    };
    let toggle_select = move |id: i64, checked: bool| {
        set_selected.update(|s| {
            if checked {
                s.insert(id);
            } else {
                s.remove(&id);
            }
        });
    };

    fetch();

    view! {
        <div class="page page-category">
            <div class="page__toolbar">
                <input
                    type="text"
                    placeholder="请输入分类名"
                    prop:value=move || keyword.get()
                    on:input=move |ev| set_keyword.set(event_target_value(&ev))
                />
                <button on:click=move |_| fetch()>"搜索"</button>
                <button class="btn-primary" on:click=move |_| crud.with_value(|c| c.open(OpenMode::Add, None))>
                    "新增分类"
                </button>
                <button
                    class="btn-danger"
                    disabled=move || selected.get().is_empty()
                    on:click=move |_| remove(Ids::Many(selected.get_untracked().into_iter().collect()))
                >
                    "批量删除"
                </button>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th></th>
                        <th>"分类名"</th>
                        <th>"文章数量"</th>
                        <th>"创建日期"</th>
                        <th>"操作"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        rows.get()
                            .into_iter()
                            .map(|row| {
                                let id = row.id;
                                let edit_form = CategoryForm { id, name: row.name.clone() };
                                view! {
                                    <tr>
                                        <td>
                                            <input
                                                type="checkbox"
                                                prop:checked=move || selected.get().contains(&id)
                                                on:change=move |ev| toggle_select(id, event_target_checked(&ev))
                                            />
                                        </td>
                                        <td>{row.name.clone()}</td>
                                        <td>{row.article_count}</td>
                                        <td>{row.created_at.clone()}</td>
                                        <td>
                                            <button on:click=move |_| {
                                                crud.with_value(|c| c.open(OpenMode::Edit, Some(edit_form.clone())))
                                            }>"编辑"</button>
                                            <button class="btn-danger" on:click=move |_| remove(Ids::One(id))>
                                                "删除"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <div class="page__footer">{move || format!("共 {} 条", total.get())}</div>

            {move || {
                state.get().is_open().then(|| {
                    view! {
                        <div class="modal-overlay">
                            <div class="modal">
                                <div class="modal-title">{crud.with_value(|c| c.title())}</div>
                                <label>"分类名"</label>
                                <input
                                    type="text"
                                    prop:value=move || form.get().name
                                    disabled=move || state.get() == ModalState::Viewing
                                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                                />
                                {move || {
                                    errors.get()
                                        .into_iter()
                                        .map(|e| view! { <div class="form-error">{e.message}</div> })
                                        .collect_view()
                                }}
                                <div class="modal-actions">
                                    <button on:click=move |_| crud.with_value(|c| c.close())>"取消"</button>
                                    <button class="btn-primary" disabled=move || loading.get() on:click=save>
                                        "保存"
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                })
            }}
        </div>
    }
}
