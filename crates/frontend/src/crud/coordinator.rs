//! Reusable create/read/update/delete modal logic.
//!
//! One `Crud` drives a single modal and its form buffer for a list page:
//! opening in view/edit/add mode, saving through the caller's API, and
//! deleting one or many rows. Loading is cleared on every exit path.

use std::rc::Rc;

use async_trait::async_trait;
use contracts::shared::response::ApiResponse;
use leptos::prelude::*;
use serde::Serialize;

use super::form::{FieldError, FormRules};
use crate::shared::dialog::{ConfirmOptions, Confirmer};
use crate::shared::http::ApiError;
use crate::shared::notify::Notifier;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Viewing,
    Editing,
    Adding,
}

impl ModalState {
    pub fn label(&self) -> &'static str {
        match self {
            ModalState::Closed => "",
            ModalState::Viewing => "查看",
            ModalState::Editing => "编辑",
            ModalState::Adding => "新增",
        }
    }

    pub fn is_open(&self) -> bool {
        *self != ModalState::Closed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    View,
    Edit,
    Add,
}

/// Rows to delete: one id, or a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ids {
    One(i64),
    Many(Vec<i64>),
}

impl Ids {
    pub fn is_empty(&self) -> bool {
        matches!(self, Ids::Many(ids) if ids.is_empty())
    }

    pub fn to_vec(&self) -> Vec<i64> {
        match self {
            Ids::One(id) => vec![*id],
            Ids::Many(ids) => ids.clone(),
        }
    }

    /// Request parameter: the bare id, or the batch as a JSON array.
    pub fn to_param(&self) -> String {
        match self {
            Ids::One(id) => id.to_string(),
            Ids::Many(ids) => serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string()),
        }
    }
}

impl From<i64> for Ids {
    fn from(id: i64) -> Self {
        Ids::One(id)
    }
}

impl From<Vec<i64>> for Ids {
    fn from(ids: Vec<i64>) -> Self {
        Ids::Many(ids)
    }
}

/// Backend operations of one entity.
#[async_trait(?Send)]
pub trait CrudApi<F> {
    async fn create(&self, form: &F) -> Result<ApiResponse, ApiError>;
    async fn update(&self, form: &F) -> Result<ApiResponse, ApiError>;
    async fn delete(&self, ids: &Ids) -> Result<ApiResponse, ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The modal was only viewing; it closed without a call.
    Closed,
    Invalid(Vec<FieldError>),
    Saved,
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    NothingSelected,
    Cancelled,
    Deleted,
    Failed(ApiError),
}

#[derive(Clone)]
pub struct Crud<F: Clone + Send + Sync + 'static> {
    name: String,
    init_form: F,
    rules: FormRules,
    api: Rc<dyn CrudApi<F>>,
    notifier: Rc<dyn Notifier>,
    confirmer: Rc<dyn Confirmer>,
    refresh: Rc<dyn Fn(&ApiResponse)>,
    state: RwSignal<ModalState>,
    form: RwSignal<F>,
    loading: RwSignal<bool>,
    errors: RwSignal<Vec<FieldError>>,
}

impl<F: Clone + Serialize + Send + Sync + 'static> Crud<F> {
    pub fn new(
        name: impl Into<String>,
        init_form: F,
        api: Rc<dyn CrudApi<F>>,
        notifier: Rc<dyn Notifier>,
        confirmer: Rc<dyn Confirmer>,
    ) -> Self {
        Self {
            name: name.into(),
            form: RwSignal::new(init_form.clone()),
            init_form,
            rules: FormRules::default(),
            api,
            notifier,
            confirmer,
            refresh: Rc::new(|_| {}),
            state: RwSignal::new(ModalState::Closed),
            loading: RwSignal::new(false),
            errors: RwSignal::new(Vec::new()),
        }
    }

    pub fn with_rules(mut self, rules: FormRules) -> Self {
        self.rules = rules;
        self
    }

    /// Called with the backend answer after a successful save or delete.
    pub fn on_refresh(mut self, refresh: impl Fn(&ApiResponse) + 'static) -> Self {
        self.refresh = Rc::new(refresh);
        self
    }

    pub fn state(&self) -> RwSignal<ModalState> {
        self.state
    }

    pub fn form(&self) -> RwSignal<F> {
        self.form
    }

    pub fn loading(&self) -> RwSignal<bool> {
        self.loading
    }

    pub fn errors(&self) -> RwSignal<Vec<FieldError>> {
        self.errors
    }

    /// "新增标签", "编辑标签"...
    pub fn title(&self) -> String {
        format!("{}{}", self.state.get_untracked().label(), self.name)
    }

    /// Open the modal. Adding always starts from the template.
    pub fn open(&self, mode: OpenMode, row: Option<F>) {
        let (state, form) = match mode {
            OpenMode::Add => (ModalState::Adding, self.init_form.clone()),
            OpenMode::Edit => (ModalState::Editing, row.unwrap_or_else(|| self.init_form.clone())),
            OpenMode::View => (ModalState::Viewing, row.unwrap_or_else(|| self.init_form.clone())),
        };
        self.form.set(form);
        self.errors.set(Vec::new());
        self.state.set(state);
    }

    pub fn close(&self) {
        self.state.set(ModalState::Closed);
    }

    pub async fn save(&self) -> SaveOutcome {
        let state = self.state.get_untracked();
        if !matches!(state, ModalState::Editing | ModalState::Adding) {
            self.close();
            return SaveOutcome::Closed;
        }

        let form = self.form.get_untracked();
        if let Err(errors) = self.rules.validate(&form) {
            self.errors.set(errors.clone());
            return SaveOutcome::Invalid(errors);
        }
        self.errors.set(Vec::new());

        self.loading.set(true);
        let result = if state == ModalState::Adding {
            self.api.create(&form).await
        } else {
            self.api.update(&form).await
        };
        self.loading.set(false);

        match result {
            Ok(resp) => {
                self.notifier.success(&format!("{}成功", state.label()));
                self.close();
                if resp.data.as_ref().is_some_and(|d| !d.is_null()) {
                    (self.refresh)(&resp);
                }
                SaveOutcome::Saved
            }
            Err(err) => {
                log::error!("{} {} failed: {}", state.label(), self.name, err);
                SaveOutcome::Failed(err)
            }
        }
    }

    /// Delete one or many rows, optionally after a confirmation.
    pub async fn delete(&self, ids: impl Into<Ids>, need_confirm: bool) -> DeleteOutcome {
        let ids = ids.into();
        if ids.is_empty() {
            self.notifier.info("请选择要删除的数据");
            return DeleteOutcome::NothingSelected;
        }
        if need_confirm && !self.confirmer.confirm(ConfirmOptions::new("确定删除？")).await {
            return DeleteOutcome::Cancelled;
        }

        self.loading.set(true);
        let result = self.api.delete(&ids).await;
        self.loading.set(false);

        match result {
            Ok(resp) => {
                if resp.is_success() {
                    self.notifier.success("删除成功");
                }
                (self.refresh)(&resp);
                DeleteOutcome::Deleted
            }
            Err(err) => {
                log::error!("delete {} {} failed: {}", self.name, ids.to_param(), err);
                DeleteOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use serde_json::{json, Value};

    use super::*;
    use crate::shared::dialog::testing::ScriptedConfirmer;
    use crate::shared::notify::testing::RecordingNotifier;

    #[derive(Default)]
    struct FakeApi {
        fail: bool,
        /// Save calls answer without a payload.
        bare: bool,
        calls: RefCell<Vec<String>>,
    }

    impl FakeApi {
        fn saved(&self, call: String) -> Result<ApiResponse, ApiError> {
            let data = (!self.bare).then(|| json!({"id": 1}));
            self.answer(call).map(|resp| ApiResponse { data, ..resp })
        }

        fn answer(&self, call: String) -> Result<ApiResponse, ApiError> {
            self.calls.borrow_mut().push(call);
            if self.fail {
                Err(ApiError::Business {
                    code: 9002,
                    message: "操作失败".to_string(),
                })
            } else {
                Ok(ApiResponse {
                    code: 0,
                    message: "OK".to_string(),
                    data: None,
                })
            }
        }
    }

    #[async_trait(?Send)]
    impl CrudApi<Value> for FakeApi {
        async fn create(&self, form: &Value) -> Result<ApiResponse, ApiError> {
            self.saved(format!("create {}", form))
        }

        async fn update(&self, form: &Value) -> Result<ApiResponse, ApiError> {
            self.saved(format!("update {}", form))
        }

        async fn delete(&self, ids: &Ids) -> Result<ApiResponse, ApiError> {
            self.answer(format!("delete {}", ids.to_param()))
        }
    }

    struct Harness {
        crud: Crud<Value>,
        api: Rc<FakeApi>,
        notifier: Rc<RecordingNotifier>,
        confirmer: Rc<ScriptedConfirmer>,
        refreshed: Rc<Cell<u32>>,
    }

    fn harness(fail: bool, confirm: bool) -> Harness {
        let api = Rc::new(FakeApi {
            fail,
            ..Default::default()
        });
        let notifier = Rc::new(RecordingNotifier::default());
        let confirmer = Rc::new(ScriptedConfirmer::answering(confirm));
        let refreshed = Rc::new(Cell::new(0));
        let counter = refreshed.clone();
        let crud = Crud::new(
            "标签",
            json!({"name": ""}),
            api.clone(),
            notifier.clone(),
            confirmer.clone(),
        )
        .with_rules(FormRules::new().required("name"))
        .on_refresh(move |_| counter.set(counter.get() + 1));
        Harness {
            crud,
            api,
            notifier,
            confirmer,
            refreshed,
        }
    }

    #[test]
    fn test_open_copies_row_or_template() {
        let h = harness(false, true);
        h.crud.open(OpenMode::Edit, Some(json!({"id": 3, "name": "Rust"})));
        assert_eq!(h.crud.state().get_untracked(), ModalState::Editing);
        assert_eq!(h.crud.form().get_untracked()["name"], "Rust");
        assert_eq!(h.crud.title(), "编辑标签");

        h.crud.open(OpenMode::Add, Some(json!({"id": 3, "name": "Rust"})));
        assert_eq!(h.crud.form().get_untracked(), json!({"name": ""}));
        assert_eq!(h.crud.title(), "新增标签");
    }

    #[tokio::test]
    async fn test_save_while_viewing_just_closes() {
        let h = harness(false, true);
        h.crud.open(OpenMode::View, Some(json!({"name": "Go"})));
        assert_eq!(h.crud.save().await, SaveOutcome::Closed);
        assert_eq!(h.crud.state().get_untracked(), ModalState::Closed);
        assert!(h.api.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_blocks_save() {
        let h = harness(false, true);
        h.crud.open(OpenMode::Add, None);
        let outcome = h.crud.save().await;
        assert!(matches!(outcome, SaveOutcome::Invalid(ref errors) if errors[0].field == "name"));
        assert_eq!(h.crud.state().get_untracked(), ModalState::Adding);
        assert!(h.api.calls.borrow().is_empty());
        assert!(h.notifier.contents().is_empty());
        assert_eq!(h.crud.errors().get_untracked().len(), 1);
    }

    #[tokio::test]
    async fn test_successful_add_closes_and_refreshes() {
        let h = harness(false, true);
        h.crud.open(OpenMode::Add, None);
        h.crud.form().update(|f| f["name"] = json!("Rust"));
        assert_eq!(h.crud.save().await, SaveOutcome::Saved);
        assert_eq!(h.crud.state().get_untracked(), ModalState::Closed);
        assert!(!h.crud.loading().get_untracked());
        assert_eq!(h.refreshed.get(), 1);
        assert_eq!(h.notifier.contents(), vec!["新增成功"]);
        assert_eq!(h.api.calls.borrow()[0], r#"create {"name":"Rust"}"#);
    }

    #[tokio::test]
    async fn test_save_without_payload_skips_refresh() {
        let h = harness(false, true);
        let api = Rc::new(FakeApi {
            bare: true,
            ..Default::default()
        });
        let refreshed = h.refreshed.clone();
        let crud = Crud::new(
            "标签",
            json!({"name": ""}),
            api.clone(),
            h.notifier.clone(),
            h.confirmer.clone(),
        )
        .on_refresh(move |_| refreshed.set(refreshed.get() + 1));

        crud.open(OpenMode::Edit, Some(json!({"id": 3, "name": "Rust"})));
        assert_eq!(crud.save().await, SaveOutcome::Saved);
        assert_eq!(crud.state().get_untracked(), ModalState::Closed);
        assert_eq!(h.refreshed.get(), 0);
        assert_eq!(h.notifier.contents(), vec!["编辑成功"]);
    }

    #[tokio::test]
    async fn test_failed_create_keeps_modal_open() {
        let h = harness(true, true);
        h.crud.open(OpenMode::Add, None);
        h.crud.form().update(|f| f["name"] = json!("Rust"));
        assert!(matches!(h.crud.save().await, SaveOutcome::Failed(_)));
        assert_eq!(h.crud.state().get_untracked(), ModalState::Adding);
        assert!(!h.crud.loading().get_untracked());
        assert_eq!(h.refreshed.get(), 0);
    }

    #[tokio::test]
    async fn test_edit_calls_update() {
        let h = harness(false, true);
        h.crud.open(OpenMode::Edit, Some(json!({"id": 7, "name": "Go"})));
        assert_eq!(h.crud.save().await, SaveOutcome::Saved);
        assert!(h.api.calls.borrow()[0].starts_with("update "));
        assert_eq!(h.notifier.contents(), vec!["编辑成功"]);
    }

    #[tokio::test]
    async fn test_delete_empty_selection() {
        let h = harness(false, true);
        assert_eq!(h.crud.delete(Vec::<i64>::new(), true).await, DeleteOutcome::NothingSelected);
        assert_eq!(h.notifier.contents(), vec!["请选择要删除的数据"]);
        assert!(h.confirmer.asked.borrow().is_empty());
        assert!(h.api.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_delete_batch_after_confirmation() {
        let h = harness(false, true);
        h.crud.open(OpenMode::Edit, Some(json!({"id": 1, "name": "x"})));
        assert_eq!(h.crud.delete(vec![1_i64, 2], true).await, DeleteOutcome::Deleted);
        assert_eq!(h.confirmer.asked.borrow()[0].content, "确定删除？");
        assert_eq!(h.api.calls.borrow()[0], "delete [1,2]");
        assert_eq!(h.notifier.contents(), vec!["删除成功"]);
        assert_eq!(h.refreshed.get(), 1);
        // deleting does not touch the modal
        assert_eq!(h.crud.state().get_untracked(), ModalState::Editing);
    }

    #[tokio::test]
    async fn test_delete_cancelled_or_failed() {
        let h = harness(false, false);
        assert_eq!(h.crud.delete(5_i64, true).await, DeleteOutcome::Cancelled);
        assert!(h.api.calls.borrow().is_empty());

        let h = harness(true, false);
        assert!(matches!(h.crud.delete(5_i64, false).await, DeleteOutcome::Failed(_)));
        assert_eq!(h.api.calls.borrow()[0], "delete 5");
        assert!(!h.crud.loading().get_untracked());
        assert_eq!(h.refreshed.get(), 0);
    }
}
