//! Confirmation dialogs.
//!
//! `DialogService::confirm` opens a dialog and resolves once the user
//! answers; `DialogHost` renders the pending dialog.

use std::sync::Arc;

use async_trait::async_trait;
use futures::channel::oneshot;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Success,
    #[default]
    Warning,
    Error,
}

impl DialogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogKind::Info => "info",
            DialogKind::Success => "success",
            DialogKind::Warning => "warning",
            DialogKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmOptions {
    pub title: Option<String>,
    pub content: String,
    pub kind: DialogKind,
    pub positive_text: String,
    pub negative_text: String,
}

impl ConfirmOptions {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: content.into(),
            kind: DialogKind::default(),
            positive_text: "确定".to_string(),
            negative_text: "取消".to_string(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn kind(mut self, kind: DialogKind) -> Self {
        self.kind = kind;
        self
    }

    /// The icon is only shown next to a title.
    pub fn show_icon(&self) -> bool {
        self.title.is_some()
    }
}

/// Anything able to ask the user a yes/no question.
#[async_trait(?Send)]
pub trait Confirmer {
    async fn confirm(&self, options: ConfirmOptions) -> bool;
}

struct PendingConfirm {
    options: ConfirmOptions,
    answer: oneshot::Sender<bool>,
}

#[derive(Clone, Copy)]
pub struct DialogService {
    pending: RwSignal<Option<PendingConfirm>>,
}

impl DialogService {
    pub fn new() -> Self {
        Self {
            pending: RwSignal::new(None),
        }
    }

    /// Options of the dialog waiting for an answer.
    pub fn current(&self) -> Option<ConfirmOptions> {
        self.pending.with(|p| p.as_ref().map(|p| p.options.clone()))
    }

    /// Answer the pending dialog. Mask clicks count as `false`.
    pub fn resolve(&self, confirmed: bool) {
        let mut taken = None;
        self.pending.update(|p| taken = p.take());
        if let Some(pending) = taken {
            let _ = pending.answer.send(confirmed);
        }
    }

    /// Callback flavour of `confirm`.
    pub fn confirm_with(
        &self,
        options: ConfirmOptions,
        on_confirm: Arc<dyn Fn() + Send + Sync>,
        on_cancel: Option<Arc<dyn Fn() + Send + Sync>>,
    ) {
        let svc = *self;
        spawn_local(async move {
            svc.confirm_then(options, on_confirm, on_cancel).await;
        });
    }

    /// Ask, then run the callback matching the answer.
    pub async fn confirm_then(
        &self,
        options: ConfirmOptions,
        on_confirm: Arc<dyn Fn() + Send + Sync>,
        on_cancel: Option<Arc<dyn Fn() + Send + Sync>>,
    ) -> bool {
        let confirmed = self.confirm(options).await;
        if confirmed {
            on_confirm();
        } else if let Some(on_cancel) = on_cancel {
            on_cancel();
        }
        confirmed
    }
}

impl Default for DialogService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Confirmer for DialogService {
    async fn confirm(&self, options: ConfirmOptions) -> bool {
        let (tx, rx) = oneshot::channel();
        let mut replaced = None;
        self.pending.update(|p| {
            replaced = p.replace(PendingConfirm { options, answer: tx });
        });
        if let Some(previous) = replaced {
            log::warn!("confirm dialog replaced before it was answered");
            let _ = previous.answer.send(false);
        }
        rx.await.unwrap_or(false)
    }
}

pub fn use_dialog() -> DialogService {
    use_context::<DialogService>().expect("DialogService not provided in context")
}

/// Renders the pending confirmation dialog, if any.
#[component]
pub fn DialogHost() -> impl IntoView {
    let svc = use_dialog();

    view! {
        {move || {
            svc.current().map(|options| {
                view! {
                    <div class="modal-overlay" on:click=move |_| svc.resolve(false)>
                        <div
                            class=format!("dialog dialog-{}", options.kind.as_str())
                            on:click=|e| e.stop_propagation()
                        >
                            {options.title.clone().map(|t| view! { <div class="dialog-title">{t}</div> })}
                            <div class="dialog-content">{options.content.clone()}</div>
                            <div class="dialog-actions">
                                <button on:click=move |_| svc.resolve(false)>{options.negative_text.clone()}</button>
                                <button class="primary" on:click=move |_| svc.resolve(true)>
                                    {options.positive_text.clone()}
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })
        }}
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;

    use async_trait::async_trait;

    use super::{ConfirmOptions, Confirmer};

    /// Answers every question with a fixed value and records it.
    #[derive(Debug, Default)]
    pub struct ScriptedConfirmer {
        pub answer: bool,
        pub asked: RefCell<Vec<ConfirmOptions>>,
    }

    impl ScriptedConfirmer {
        pub fn answering(answer: bool) -> Self {
            Self {
                answer,
                asked: RefCell::default(),
            }
        }
    }

    #[async_trait(?Send)]
    impl Confirmer for ScriptedConfirmer {
        async fn confirm(&self, options: ConfirmOptions) -> bool {
            self.asked.borrow_mut().push(options);
            self.answer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = ConfirmOptions::new("确定删除？");
        assert_eq!(options.positive_text, "确定");
        assert_eq!(options.negative_text, "取消");
        assert_eq!(options.kind, DialogKind::Warning);
        assert!(!options.show_icon());
        assert!(options.title("提示").show_icon());
    }

    #[tokio::test]
    async fn test_confirm_resolves_with_answer() {
        let svc = DialogService::new();
        let (answer, _) = futures::join!(svc.confirm(ConfirmOptions::new("确定删除？")), async {
            assert_eq!(svc.current().map(|o| o.content), Some("确定删除？".to_string()));
            svc.resolve(true);
        });
        assert!(answer);
        assert!(svc.current().is_none());
    }

    #[tokio::test]
    async fn test_callbacks_follow_the_answer() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let confirmed = Arc::new(AtomicUsize::new(0));
        let cancelled = Arc::new(AtomicUsize::new(0));
        let on_confirm: Arc<dyn Fn() + Send + Sync> = {
            let confirmed = confirmed.clone();
            Arc::new(move || {
                confirmed.fetch_add(1, Ordering::SeqCst);
            })
        };
        let on_cancel: Arc<dyn Fn() + Send + Sync> = {
            let cancelled = cancelled.clone();
            Arc::new(move || {
                cancelled.fetch_add(1, Ordering::SeqCst);
            })
        };

        let svc = DialogService::new();
        let (answer, _) = futures::join!(
            svc.confirm_then(
                ConfirmOptions::new("确定删除？"),
                on_confirm.clone(),
                Some(on_cancel.clone())
            ),
            async { svc.resolve(true) }
        );
        assert!(answer);
        assert_eq!(confirmed.load(Ordering::SeqCst), 1);
        assert_eq!(cancelled.load(Ordering::SeqCst), 0);

        let (answer, _) = futures::join!(
            svc.confirm_then(ConfirmOptions::new("确定删除？"), on_confirm.clone(), Some(on_cancel)),
            async { svc.resolve(false) }
        );
        assert!(!answer);
        assert_eq!(confirmed.load(Ordering::SeqCst), 1);
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);

        let (answer, _) = futures::join!(
            svc.confirm_then(ConfirmOptions::new("退出登录？"), on_confirm, None),
            async { svc.resolve(false) }
        );
        assert!(!answer);
        assert_eq!(confirmed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mask_click_cancels() {
        let svc = DialogService::new();
        let (answer, _) = futures::join!(svc.confirm(ConfirmOptions::new("退出登录？")), async {
            svc.resolve(false);
        });
        assert!(!answer);
    }
}
