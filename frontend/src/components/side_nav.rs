//! Role-aware side navigation for the HR and planner shells.
//!
//! The menu trees are static; what a user sees is `filter_for_role` applied
//! to them. Which groups are open and which leaf is highlighted both derive
//! from the current path.

use std::collections::BTreeSet;

use leptos::*;

use crate::{api::Role, router::paths};

#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub key: &'static str,
    pub label: &'static str,
    pub href: Option<&'static str>,
    pub icon: &'static str,
    /// Empty means every role.
    pub roles: Vec<Role>,
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn leaf(key: &'static str, label: &'static str, href: &'static str, icon: &'static str) -> Self {
        Self {
            key,
            label,
            href: Some(href),
            icon,
            roles: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn group(
        key: &'static str,
        label: &'static str,
        icon: &'static str,
        children: Vec<NavItem>,
    ) -> Self {
        Self {
            key,
            label,
            href: None,
            icon,
            roles: Vec::new(),
            children,
        }
    }

    pub fn for_roles(mut self, roles: &[Role]) -> Self {
        self.roles = roles.to_vec();
        self
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty() || self.href.is_none()
    }

    fn allows(&self, role: Role) -> bool {
        self.roles.is_empty() || self.roles.contains(&role)
    }
}

pub const BACK_OFFICE: &[Role] = &[Role::Admin, Role::Hr, Role::Manager];
pub const REVIEWERS: &[Role] = &[Role::Admin, Role::Hr];
pub const CARE_TEAM: &[Role] = &[Role::Admin, Role::Hr, Role::Manager, Role::Carer];

pub fn hr_menu() -> Vec<NavItem> {
    vec![
        NavItem::group(
            "organisation",
            "Organisation",
            "fa-sitemap",
            vec![
                NavItem::leaf("department", "Department", paths::DEPARTMENT, "fa-building"),
                NavItem::leaf("designation", "Designation", paths::DESIGNATION, "fa-id-badge"),
            ],
        )
        .for_roles(BACK_OFFICE),
        NavItem::group(
            "workforce",
            "Workforce",
            "fa-users",
            vec![
                NavItem::leaf("shift", "Shift", paths::SHIFT, "fa-clock"),
                NavItem::leaf("attendance", "Attendance", paths::ATTENDANCE, "fa-user-check"),
                NavItem::leaf("device", "Devices", paths::DEVICE, "fa-tablet-alt"),
            ],
        )
        .for_roles(BACK_OFFICE),
        NavItem::group(
            "recruitment",
            "Recruitment",
            "fa-user-plus",
            vec![
                NavItem::leaf("vacancy", "Vacancy", paths::VACANCY, "fa-briefcase"),
                NavItem::leaf(
                    "pending-hiring",
                    "Pending Hiring",
                    paths::PENDING_HIRING,
                    "fa-hourglass-half",
                ),
            ],
        )
        .for_roles(BACK_OFFICE),
        NavItem::leaf("notice", "Notice Board", paths::NOTICE, "fa-bullhorn"),
        NavItem::group(
            "documents",
            "Documents",
            "fa-file-alt",
            vec![
                NavItem::leaf("my-documents", "My Requests", paths::MY_DOCUMENTS, "fa-file-signature"),
                NavItem::leaf(
                    "document-review",
                    "Review Requests",
                    paths::DOCUMENT_REVIEW,
                    "fa-clipboard-check",
                )
                .for_roles(REVIEWERS),
            ],
        ),
    ]
}

pub fn planner_menu() -> Vec<NavItem> {
    vec![
        NavItem::group(
            "planner",
            "Planner",
            "fa-calendar-day",
            vec![
                NavItem::leaf("day-planner", "Day Planner", paths::PLANNER, "fa-calendar-alt"),
                NavItem::leaf("extra-call", "Extra Call", paths::EXTRA_CALL, "fa-phone-alt")
                    .for_roles(BACK_OFFICE),
            ],
        ),
        NavItem::group(
            "service-users",
            "Service Users",
            "fa-hands-helping",
            vec![
                NavItem::leaf("service-user", "Service Users", paths::SERVICE_USER, "fa-user"),
                NavItem::leaf(
                    "service-funder",
                    "Service Funders",
                    paths::SERVICE_FUNDER,
                    "fa-pound-sign",
                ),
            ],
        )
        .for_roles(BACK_OFFICE),
        NavItem::group(
            "care-records",
            "Care Records",
            "fa-notes-medical",
            vec![
                NavItem::leaf(
                    "risk-assessment",
                    "Risk Assessments",
                    paths::RISK_ASSESSMENT,
                    "fa-exclamation-triangle",
                ),
                NavItem::leaf("support-plan", "Support Plans", paths::SUPPORT_PLAN, "fa-hands"),
            ],
        )
        .for_roles(CARE_TEAM),
    ]
}

/// Drops items the role may not see, and groups left with nothing in them.
pub fn filter_for_role(items: &[NavItem], role: Role) -> Vec<NavItem> {
    items
        .iter()
        .filter(|item| item.allows(role))
        .filter_map(|item| {
            if item.children.is_empty() {
                return item.href.map(|_| item.clone());
            }
            let children = filter_for_role(&item.children, role);
            if children.is_empty() {
                None
            } else {
                Some(NavItem {
                    children,
                    ..item.clone()
                })
            }
        })
        .collect()
}

pub fn is_path_match(path: &str, href: &str) -> bool {
    path == href || path.starts_with(&format!("{}/", href.trim_end_matches('/')))
}

fn matches_subtree(item: &NavItem, path: &str) -> bool {
    item.href.map(|href| is_path_match(path, href)).unwrap_or(false)
        || item.children.iter().any(|child| matches_subtree(child, path))
}

pub fn expanded_keys(items: &[NavItem], path: &str) -> BTreeSet<&'static str> {
    let mut keys = BTreeSet::new();
    for item in items {
        if !item.children.is_empty() && matches_subtree(item, path) {
            keys.insert(item.key);
            keys.extend(expanded_keys(&item.children, path));
        }
    }
    keys
}

/// Key of the leaf with the longest matching href.
pub fn active_key(items: &[NavItem], path: &str) -> Option<&'static str> {
    fn walk(items: &[NavItem], path: &str, best: &mut Option<(usize, &'static str)>) {
        for item in items {
            if let Some(href) = item.href {
                if is_path_match(path, href) && best.map_or(true, |(len, _)| href.len() > len) {
                    *best = Some((href.len(), item.key));
                }
            }
            walk(&item.children, path, best);
        }
    }
    let mut best = None;
    walk(items, path, &mut best);
    best.map(|(_, key)| key)
}

fn render_items(
    items: Vec<NavItem>,
    depth: usize,
    active: Memo<Option<&'static str>>,
    expanded: RwSignal<BTreeSet<&'static str>>,
) -> View {
    items
        .into_iter()
        .map(|item| {
            let key = item.key;
            let indent = format!("pl-{}", 3 + depth * 4);
            if item.is_group() {
                let children = item.children.clone();
                let toggle = move |_| {
                    expanded.update(|open| {
                        if !open.remove(key) {
                            open.insert(key);
                        }
                    })
                };
                let is_open = move || expanded.with(|open| open.contains(key));
                view! {
                    <li>
                        <button
                            type="button"
                            class=format!("w-full flex items-center justify-between {} pr-3 py-2 text-sm font-medium text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover rounded-md", indent)
                            aria-expanded=move || is_open().to_string()
                            on:click=toggle
                        >
                            <span class="flex items-center gap-2">
                                <i class=format!("fas {}", item.icon)></i>
                                {item.label}
                            </span>
                            <i class=move || if is_open() { "fas fa-chevron-down text-xs" } else { "fas fa-chevron-right text-xs" }></i>
                        </button>
                        <Show when=is_open>
                            <ul class="mt-1 space-y-1">
                                {render_items(children.clone(), depth + 1, active, expanded)}
                            </ul>
                        </Show>
                    </li>
                }
                .into_view()
            } else {
                let href = item.href.unwrap_or_default();
                let is_active = move || active.get() == Some(key);
                view! {
                    <li>
                        <a
                            href=href
                            class=move || {
                                let tone = if is_active() {
                                    "bg-action-primary-bg text-action-primary-text"
                                } else {
                                    "text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                                };
                                format!("flex items-center gap-2 {} pr-3 py-2 text-sm rounded-md {}", indent, tone)
                            }
                            aria-current=move || is_active().then_some("page")
                        >
                            <i class=format!("fas {}", item.icon)></i>
                            {item.label}
                        </a>
                    </li>
                }
                .into_view()
            }
        })
        .collect_view()
}

#[component]
pub fn SideNav(
    #[prop(into)] items: MaybeSignal<Vec<NavItem>>,
    #[prop(into)] current_path: Signal<String>,
) -> impl IntoView {
    let items_for_state = items.clone();
    let expanded = create_rw_signal(
        items_for_state.with_untracked(|tree| expanded_keys(tree, &current_path.get_untracked())),
    );
    let items_for_effect = items.clone();
    create_effect(move |_| {
        let path = current_path.get();
        let keys = items_for_effect.with(|tree| expanded_keys(tree, &path));
        expanded.set(keys);
    });
    let items_for_active = items.clone();
    let active = create_memo(move |_| {
        let path = current_path.get();
        items_for_active.with(|tree| active_key(tree, &path))
    });

    view! {
        <nav class="w-64 shrink-0 border-r border-border bg-surface-elevated p-3" aria-label="Main">
            <ul class="space-y-1">
                {move || render_items(items.get(), 0, active, expanded)}
            </ul>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_keys(items: &[NavItem]) -> Vec<&'static str> {
        items
            .iter()
            .flat_map(|item| {
                let mut keys = vec![item.key];
                keys.extend(all_keys(&item.children));
                keys
            })
            .collect()
    }

    #[test]
    fn path_match_requires_segment_boundary() {
        assert!(is_path_match("/hr/shift", "/hr/shift"));
        assert!(is_path_match("/hr/shift/create", "/hr/shift"));
        assert!(!is_path_match("/hr/shifts", "/hr/shift"));
        assert!(!is_path_match("/hr", "/hr/shift"));
    }

    #[test]
    fn staff_only_see_unrestricted_items() {
        let visible = filter_for_role(&hr_menu(), Role::Staff);
        let keys = all_keys(&visible);
        assert!(keys.contains(&"notice"));
        assert!(keys.contains(&"my-documents"));
        assert!(!keys.contains(&"document-review"));
        assert!(!keys.contains(&"organisation"));
    }

    #[test]
    fn groups_emptied_by_filtering_are_dropped() {
        let menu = vec![NavItem::group(
            "only-admin",
            "Only admin",
            "fa-lock",
            vec![NavItem::leaf("secret", "Secret", "/secret", "fa-key").for_roles(&[Role::Admin])],
        )];
        assert!(filter_for_role(&menu, Role::Carer).is_empty());
        assert_eq!(filter_for_role(&menu, Role::Admin).len(), 1);
    }

    #[test]
    fn nested_route_expands_parent_and_activates_leaf() {
        let menu = hr_menu();
        let expanded = expanded_keys(&menu, "/hr/shift/create");
        assert_eq!(expanded.into_iter().collect::<Vec<_>>(), vec!["workforce"]);
        assert_eq!(active_key(&menu, "/hr/shift/create"), Some("shift"));
    }

    #[test]
    fn unknown_path_expands_and_activates_nothing() {
        let menu = planner_menu();
        assert!(expanded_keys(&menu, "/nowhere").is_empty());
        assert_eq!(active_key(&menu, "/nowhere"), None);
    }

    #[test]
    fn longest_href_wins() {
        let menu = vec![
            NavItem::leaf("planner", "Planner", "/people-planner/planner", "fa-a"),
            NavItem::leaf("extra", "Extra", "/people-planner/planner/extra", "fa-b"),
        ];
        assert_eq!(active_key(&menu, "/people-planner/planner/extra"), Some("extra"));
        assert_eq!(active_key(&menu, "/people-planner/planner"), Some("planner"));
    }
}
