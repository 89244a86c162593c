use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::{
    api::{ApiClient, Role},
    components::{
        guard::{RequireAuth, RequireRole},
        layout::{HrLayout, PeoplePlannerLayout, APP_NAME},
        side_nav::{BACK_OFFICE, CARE_TEAM, REVIEWERS},
        toast::ToastHost,
    },
    pages::{
        documents::{DocumentReviewPage, MyDocumentsPage},
        hr::{
            AttendancePage, DepartmentPage, DesignationPage, DevicePage, HrHomePage, NoticePage,
            PendingHiringPage, ShiftCreatePage, ShiftPage, VacancyPage,
        },
        login::LoginPage,
        people_planner::{
            DayPlannerPage, ExtraCallPage, NewRiskAssessmentPage, NewSupportPlanPage,
            RiskAssessmentListPage, ServiceFunderPage, ServiceUserPage, SupportPlanListPage,
        },
    },
    state::{session::SessionProvider, toast::provide_toasts},
};

pub const LOGIN_PATH: &str = "/";

pub mod paths {
    pub const HR_HOME: &str = "/hr";
    pub const DEPARTMENT: &str = "/hr/department";
    pub const DESIGNATION: &str = "/hr/designation";
    pub const SHIFT: &str = "/hr/shift";
    pub const SHIFT_CREATE: &str = "/hr/shift/create";
    pub const ATTENDANCE: &str = "/hr/attendance";
    pub const DEVICE: &str = "/hr/device";
    pub const VACANCY: &str = "/hr/vacancy";
    pub const PENDING_HIRING: &str = "/hr/pending-hiring";
    pub const NOTICE: &str = "/hr/notice";
    pub const MY_DOCUMENTS: &str = "/hr/documents";
    pub const DOCUMENT_REVIEW: &str = "/hr/documents/review";

    pub const PLANNER: &str = "/people-planner/planner";
    pub const EXTRA_CALL: &str = "/people-planner/planner/extra-call";
    pub const SERVICE_USER: &str = "/people-planner/service-user";
    pub const SERVICE_FUNDER: &str = "/people-planner/service-funder";
    pub const RISK_ASSESSMENT: &str = "/people-planner/risk-assessment";
    pub const RISK_ASSESSMENT_NEW: &str = "/people-planner/risk-assessment/new";
    pub const SUPPORT_PLAN: &str = "/people-planner/support-plan";
    pub const SUPPORT_PLAN_NEW: &str = "/people-planner/support-plan/new";
}

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    paths::HR_HOME,
    paths::DEPARTMENT,
    paths::DESIGNATION,
    paths::SHIFT,
    paths::SHIFT_CREATE,
    paths::ATTENDANCE,
    paths::DEVICE,
    paths::VACANCY,
    paths::PENDING_HIRING,
    paths::NOTICE,
    paths::MY_DOCUMENTS,
    paths::DOCUMENT_REVIEW,
    paths::PLANNER,
    paths::EXTRA_CALL,
    paths::SERVICE_USER,
    paths::SERVICE_FUNDER,
    paths::RISK_ASSESSMENT,
    paths::RISK_ASSESSMENT_NEW,
    paths::SUPPORT_PLAN,
    paths::SUPPORT_PLAN_NEW,
];

pub const ROUTE_PATHS: &[&str] = &[
    LOGIN_PATH,
    paths::HR_HOME,
    paths::DEPARTMENT,
    paths::DESIGNATION,
    paths::SHIFT,
    paths::SHIFT_CREATE,
    paths::ATTENDANCE,
    paths::DEVICE,
    paths::VACANCY,
    paths::PENDING_HIRING,
    paths::NOTICE,
    paths::MY_DOCUMENTS,
    paths::DOCUMENT_REVIEW,
    paths::PLANNER,
    paths::EXTRA_CALL,
    paths::SERVICE_USER,
    paths::SERVICE_FUNDER,
    paths::RISK_ASSESSMENT,
    paths::RISK_ASSESSMENT_NEW,
    paths::SUPPORT_PLAN,
    paths::SUPPORT_PLAN_NEW,
];

type Page = fn() -> View;

fn guarded(roles: Option<&'static [Role]>, page: Page) -> View {
    match roles {
        Some(roles) => view! { <RequireRole roles=roles>{page()}</RequireRole> }.into_view(),
        None => page(),
    }
}

fn hr_route(roles: Option<&'static [Role]>, page: Page) -> View {
    view! {
        <RequireAuth>
            <HrLayout>{guarded(roles, page)}</HrLayout>
        </RequireAuth>
    }
    .into_view()
}

fn planner_route(roles: Option<&'static [Role]>, page: Page) -> View {
    view! {
        <RequireAuth>
            <PeoplePlannerLayout>{guarded(roles, page)}</PeoplePlannerLayout>
        </RequireAuth>
    }
    .into_view()
}

fn hr_home() -> View {
    hr_route(None, || view! { <HrHomePage/> }.into_view())
}

fn department() -> View {
    hr_route(Some(BACK_OFFICE), || view! { <DepartmentPage/> }.into_view())
}

fn designation() -> View {
    hr_route(Some(BACK_OFFICE), || view! { <DesignationPage/> }.into_view())
}

fn shift() -> View {
    hr_route(Some(BACK_OFFICE), || view! { <ShiftPage/> }.into_view())
}

fn shift_create() -> View {
    hr_route(Some(BACK_OFFICE), || view! { <ShiftCreatePage/> }.into_view())
}

fn attendance() -> View {
    hr_route(Some(BACK_OFFICE), || view! { <AttendancePage/> }.into_view())
}

fn device() -> View {
    hr_route(Some(BACK_OFFICE), || view! { <DevicePage/> }.into_view())
}

fn vacancy() -> View {
    hr_route(Some(BACK_OFFICE), || view! { <VacancyPage/> }.into_view())
}

fn pending_hiring() -> View {
    hr_route(Some(BACK_OFFICE), || view! { <PendingHiringPage/> }.into_view())
}

fn notice() -> View {
    hr_route(None, || view! { <NoticePage/> }.into_view())
}

fn my_documents() -> View {
    hr_route(None, || view! { <MyDocumentsPage/> }.into_view())
}

fn document_review() -> View {
    hr_route(Some(REVIEWERS), || view! { <DocumentReviewPage/> }.into_view())
}

fn day_planner() -> View {
    planner_route(None, || view! { <DayPlannerPage/> }.into_view())
}

fn extra_call() -> View {
    planner_route(Some(BACK_OFFICE), || view! { <ExtraCallPage/> }.into_view())
}

fn service_user() -> View {
    planner_route(Some(BACK_OFFICE), || view! { <ServiceUserPage/> }.into_view())
}

fn service_funder() -> View {
    planner_route(Some(BACK_OFFICE), || view! { <ServiceFunderPage/> }.into_view())
}

fn risk_assessments() -> View {
    planner_route(Some(CARE_TEAM), || view! { <RiskAssessmentListPage/> }.into_view())
}

fn new_risk_assessment() -> View {
    planner_route(Some(CARE_TEAM), || view! { <NewRiskAssessmentPage/> }.into_view())
}

fn support_plans() -> View {
    planner_route(Some(CARE_TEAM), || view! { <SupportPlanListPage/> }.into_view())
}

fn new_support_plan() -> View {
    planner_route(Some(CARE_TEAM), || view! { <NewSupportPlanPage/> }.into_view())
}

fn page_title(page: String) -> String {
    if page.is_empty() {
        APP_NAME.to_string()
    } else {
        format!("{} | {}", page, APP_NAME)
    }
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(ApiClient::new());
    provide_toasts();
    view! {
        <Title formatter=page_title/>
        <SessionProvider>
            <Router>
                <Routes>
                    <Route path=LOGIN_PATH view=LoginPage/>
                    <Route path=paths::HR_HOME view=hr_home/>
                    <Route path=paths::DEPARTMENT view=department/>
                    <Route path=paths::DESIGNATION view=designation/>
                    <Route path=paths::SHIFT view=shift/>
                    <Route path=paths::SHIFT_CREATE view=shift_create/>
                    <Route path=paths::ATTENDANCE view=attendance/>
                    <Route path=paths::DEVICE view=device/>
                    <Route path=paths::VACANCY view=vacancy/>
                    <Route path=paths::PENDING_HIRING view=pending_hiring/>
                    <Route path=paths::NOTICE view=notice/>
                    <Route path=paths::MY_DOCUMENTS view=my_documents/>
                    <Route path=paths::DOCUMENT_REVIEW view=document_review/>
                    <Route path=paths::PLANNER view=day_planner/>
                    <Route path=paths::EXTRA_CALL view=extra_call/>
                    <Route path=paths::SERVICE_USER view=service_user/>
                    <Route path=paths::SERVICE_FUNDER view=service_funder/>
                    <Route path=paths::RISK_ASSESSMENT view=risk_assessments/>
                    <Route path=paths::RISK_ASSESSMENT_NEW view=new_risk_assessment/>
                    <Route path=paths::SUPPORT_PLAN view=support_plans/>
                    <Route path=paths::SUPPORT_PLAN_NEW view=new_support_plan/>
                </Routes>
            </Router>
            <ToastHost/>
        </SessionProvider>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::side_nav::{hr_menu, planner_menu, NavItem};
    use std::collections::HashSet;

    fn hrefs(items: &[NavItem], out: &mut Vec<&'static str>) {
        for item in items {
            out.extend(item.href);
            hrefs(&item.children, out);
        }
    }

    #[test]
    fn protected_routes_are_everything_but_login() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        let protected: HashSet<&str> = PROTECTED_ROUTE_PATHS.iter().copied().collect();
        assert!(!protected.contains(LOGIN_PATH));
        assert!(protected.is_subset(&all));
        assert_eq!(protected.len() + 1, all.len());
    }

    #[test]
    fn page_titles_carry_the_app_name() {
        assert_eq!(page_title(String::new()), "People Planner");
        assert_eq!(page_title("Shifts".into()), "Shifts | People Planner");
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }

    #[test]
    fn every_menu_link_has_a_route() {
        let mut links = Vec::new();
        hrefs(&hr_menu(), &mut links);
        hrefs(&planner_menu(), &mut links);
        assert!(!links.is_empty());
        for link in links {
            assert!(ROUTE_PATHS.contains(&link), "menu links to unknown route {}", link);
        }
    }

    #[test]
    fn sections_live_under_their_prefix() {
        for path in PROTECTED_ROUTE_PATHS {
            assert!(
                path.starts_with("/hr") || path.starts_with("/people-planner"),
                "unexpected route {}",
                path
            );
        }
    }
}
