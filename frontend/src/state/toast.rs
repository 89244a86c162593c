use leptos::*;
use uuid::Uuid;

pub const TOAST_DISMISS_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "bg-status-success-bg text-status-success-text border-status-success-border",
            ToastKind::Error => "bg-status-error-bg text-status-error-text border-status-error-border",
            ToastKind::Info => "bg-status-info-bg text-status-info-text border-status-info-border",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

/// Queue of transient notifications shown by the toast host.
#[derive(Debug, Clone, Copy)]
pub struct ToastState {
    toasts: RwSignal<Vec<Toast>>,
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            toasts: create_rw_signal(Vec::new()),
        }
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
        };
        let id = toast.id;
        self.toasts.update(|list| list.push(toast));
        self.schedule_dismiss(id);
        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Info, message)
    }

    pub fn dismiss(&self, id: Uuid) {
        self.toasts.update(|list| list.retain(|toast| toast.id != id));
    }

    pub fn items(&self) -> Signal<Vec<Toast>> {
        self.toasts.into()
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_dismiss(&self, id: Uuid) {
        let state = *self;
        gloo_timers::callback::Timeout::new(TOAST_DISMISS_MS, move || state.dismiss(id)).forget();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_dismiss(&self, _id: Uuid) {}
}

pub fn provide_toasts() -> ToastState {
    let state = ToastState::new();
    provide_context(state);
    state
}

pub fn use_toasts() -> ToastState {
    use_context::<ToastState>().unwrap_or_else(provide_toasts)
}
