use crate::{
    api::Role,
    components::side_nav::{filter_for_role, hr_menu, planner_menu, NavItem},
    state::session::use_session,
};
use leptos::*;

/// Every reachable leaf of `items`, in menu order.
pub fn shortcuts(items: &[NavItem], role: Role) -> Vec<(&'static str, &'static str, &'static str)> {
    fn walk(items: &[NavItem], out: &mut Vec<(&'static str, &'static str, &'static str)>) {
        for item in items {
            if let Some(href) = item.href {
                out.push((item.label, href, item.icon));
            }
            walk(&item.children, out);
        }
    }
    let mut out = Vec::new();
    walk(&filter_for_role(items, role), &mut out);
    out
}

fn shortcut_grid(title: &'static str, links: Vec<(&'static str, &'static str, &'static str)>) -> View {
    if links.is_empty() {
        return ().into_view();
    }
    view! {
        <section class="space-y-3">
            <h2 class="text-sm font-semibold uppercase tracking-wide text-fg-muted">{title}</h2>
            <div class="grid grid-cols-2 gap-3 md:grid-cols-4">
                {links
                    .into_iter()
                    .map(|(label, href, icon)| {
                        view! {
                            <a
                                href=href
                                class="flex items-center gap-3 rounded-lg border border-border bg-surface-elevated p-4 text-sm font-medium text-fg hover:bg-action-ghost-bg-hover"
                            >
                                <i class=format!("fas {} text-fg-muted", icon)></i>
                                <span>{label}</span>
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
    .into_view()
}

#[component]
pub fn HrHomePage() -> impl IntoView {
    let (session, _) = use_session();

    view! {
        {move || {
            let state = session.get();
            let Some(user) = state.user else {
                return ().into_view();
            };
            view! {
                <div class="space-y-8">
                    <div>
                        <h1 class="text-2xl font-bold text-fg">{format!("Welcome back, {}", user.name)}</h1>
                        <p class="text-sm text-fg-muted">{format!("Signed in as {}", user.role.label())}</p>
                    </div>
                    {shortcut_grid("HR", shortcuts(&hr_menu(), user.role))}
                    {shortcut_grid("People Planner", shortcuts(&planner_menu(), user.role))}
                </div>
            }
            .into_view()
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::paths;

    #[test]
    fn carers_get_no_back_office_shortcuts() {
        let links = shortcuts(&hr_menu(), Role::Carer);
        let hrefs: Vec<_> = links.iter().map(|(_, href, _)| *href).collect();
        assert!(hrefs.contains(&paths::NOTICE));
        assert!(hrefs.contains(&paths::MY_DOCUMENTS));
        assert!(!hrefs.contains(&paths::DEPARTMENT));
        assert!(!hrefs.contains(&paths::DOCUMENT_REVIEW));
    }

    #[test]
    fn admins_see_every_planner_leaf() {
        let links = shortcuts(&planner_menu(), Role::Admin);
        assert!(links.iter().any(|(_, href, _)| *href == paths::EXTRA_CALL));
        assert!(links.iter().any(|(_, href, _)| *href == paths::SUPPORT_PLAN));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{
        helpers::{hr_user, provide_session},
        ssr::render_to_string,
    };

    #[test]
    fn greets_the_signed_in_user() {
        let html = render_to_string(|| {
            provide_session(Some(hr_user()));
            view! { <HrHomePage/> }
        });
        assert!(html.contains("Welcome back, Harper Reed"));
        assert!(html.contains("Signed in as HR"));
        assert!(html.contains("Department"));
    }
}
