//! Staff document requests and the reviewer queue.

use leptos::*;

use crate::api::DocumentRequestStatus;

pub mod my_requests;
pub mod review;

pub use my_requests::MyDocumentsPage;
pub use review::DocumentReviewPage;

pub(crate) const HEADER_CELL: &str =
    "px-4 py-2 text-left text-xs font-semibold uppercase tracking-wide text-fg-muted";
pub(crate) const CELL: &str = "px-4 py-2 text-sm text-fg";

pub fn status_badge(status: DocumentRequestStatus) -> View {
    let class = match status {
        DocumentRequestStatus::Pending => "bg-status-warning-bg text-status-warning-text",
        DocumentRequestStatus::Approved => "bg-status-success-bg text-status-success-text",
        DocumentRequestStatus::Rejected => "bg-status-error-bg text-status-error-text",
    };
    view! {
        <span class=format!("inline-flex rounded-full px-2 py-0.5 text-xs font-medium {}", class)>
            {status.label()}
        </span>
    }
    .into_view()
}

/// Date part of an ISO timestamp.
pub fn requested_on(created_at: Option<&str>) -> String {
    match created_at {
        Some(raw) => raw.get(..10).unwrap_or(raw).to_string(),
        None => "-".to_string(),
    }
}
