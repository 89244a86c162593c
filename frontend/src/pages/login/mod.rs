use leptos::*;

mod form;
mod panel;
pub mod utils;

pub use panel::LoginPanel;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! { <LoginPanel /> }
}
