//! Toast-style notifications.
//!
//! `MessageBoard` is the plain state (what is on screen); `NotificationService`
//! wraps it in a signal, schedules auto-dismissal and is provided through
//! context. Keyed messages are updated in place instead of stacking.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Auto-dismiss delay for plain messages.
pub const DEFAULT_DURATION_MS: u32 = 3000;
/// Auto-dismiss delay for keyed messages, counted from the last update.
pub const KEYED_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
    Warning,
    Loading,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
            MessageKind::Info => "info",
            MessageKind::Warning => "warning",
            MessageKind::Loading => "loading",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageOptions {
    /// Messages sharing a key replace each other.
    pub key: Option<String>,
    /// `Some(0)` keeps the message until it is closed.
    pub duration_ms: Option<u32>,
}

impl MessageOptions {
    pub fn keyed(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            duration_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub key: Option<String>,
    pub kind: MessageKind,
    pub content: String,
    generation: u64,
}

/// A pending auto-dismissal. Stale if the message was updated since.
#[derive(Debug, Clone, PartialEq)]
pub struct Dismissal {
    pub id: String,
    pub generation: u64,
    pub after_ms: u32,
}

#[derive(Debug, Clone, Default)]
pub struct MessageBoard {
    messages: Vec<Message>,
    generation: u64,
}

impl MessageBoard {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn show(&mut self, kind: MessageKind, content: &str, options: &MessageOptions) -> Option<Dismissal> {
        self.generation += 1;
        let generation = self.generation;

        let existing = options
            .key
            .as_ref()
            .and_then(|key| self.messages.iter_mut().find(|m| m.key.as_ref() == Some(key)));

        let id = match existing {
            Some(message) => {
                message.kind = kind;
                message.content = content.to_string();
                message.generation = generation;
                message.id.clone()
            }
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                self.messages.push(Message {
                    id: id.clone(),
                    key: options.key.clone(),
                    kind,
                    content: content.to_string(),
                    generation,
                });
                id
            }
        };

        let after_ms = match (options.duration_ms, kind, &options.key) {
            (Some(ms), _, _) => ms,
            (None, MessageKind::Loading, _) => 0,
            (None, _, Some(_)) => KEYED_DURATION_MS,
            (None, _, None) => DEFAULT_DURATION_MS,
        };
        (after_ms > 0).then_some(Dismissal {
            id,
            generation,
            after_ms,
        })
    }

    /// Apply a scheduled dismissal; ignored when the message changed since.
    pub fn dismiss(&mut self, dismissal: &Dismissal) -> bool {
        let before = self.messages.len();
        self.messages
            .retain(|m| !(m.id == dismissal.id && m.generation == dismissal.generation));
        before != self.messages.len()
    }

    pub fn close(&mut self, id: &str) {
        self.messages.retain(|m| m.id != id);
    }
}

/// Anything able to show a notification.
pub trait Notifier {
    fn notify(&self, kind: MessageKind, content: &str);

    fn success(&self, content: &str) {
        self.notify(MessageKind::Success, content);
    }

    fn error(&self, content: &str) {
        self.notify(MessageKind::Error, content);
    }

    fn info(&self, content: &str) {
        self.notify(MessageKind::Info, content);
    }

    fn warning(&self, content: &str) {
        self.notify(MessageKind::Warning, content);
    }
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    board: RwSignal<MessageBoard>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            board: RwSignal::new(MessageBoard::default()),
        }
    }

    pub fn board(&self) -> RwSignal<MessageBoard> {
        self.board
    }

    pub fn show(&self, kind: MessageKind, content: &str, options: MessageOptions) {
        let mut dismissal = None;
        self.board.update(|board| dismissal = board.show(kind, content, &options));
        if let Some(dismissal) = dismissal {
            let board = self.board;
            spawn_local(async move {
                TimeoutFuture::new(dismissal.after_ms).await;
                board.update(|b| {
                    b.dismiss(&dismissal);
                });
            });
        }
    }

    /// One message per item.
    pub fn show_all(&self, kind: MessageKind, contents: &[String], options: MessageOptions) {
        for content in contents {
            self.show(kind, content, options.clone());
        }
    }

    pub fn loading(&self, content: &str, options: MessageOptions) {
        self.show(MessageKind::Loading, content, options);
    }

    pub fn close(&self, id: &str) {
        self.board.update(|b| b.close(id));
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotificationService {
    fn notify(&self, kind: MessageKind, content: &str) {
        self.show(kind, content, MessageOptions::default());
    }
}

pub fn use_notification() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not provided in context")
}

/// Renders the current messages.
#[component]
pub fn MessageHost() -> impl IntoView {
    let svc = use_notification();

    view! {
        <div class="message-host">
            {move || {
                svc.board()
                    .get()
                    .messages()
                    .iter()
                    .map(|m| {
                        let id = m.id.clone();
                        view! {
                            <div class=format!("message message-{}", m.kind.as_str()) on:click=move |_| svc.close(&id)>
                                {m.content.clone()}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
