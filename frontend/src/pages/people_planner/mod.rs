//! Care-side pages: the day planner, service users and funders, and the
//! questionnaire-driven care plans.

pub mod care_plans;
pub mod planner;
pub mod service_funder;
pub mod service_user;

pub use care_plans::{
    NewRiskAssessmentPage, NewSupportPlanPage, RiskAssessmentListPage, SupportPlanListPage,
};
pub use planner::{DayPlannerPage, ExtraCallPage};
pub use service_funder::ServiceFunderPage;
pub use service_user::ServiceUserPage;
