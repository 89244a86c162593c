pub mod answers;
pub mod list;
pub mod panel;
pub mod wizard;

pub use list::{RiskAssessmentListPage, SupportPlanListPage};
pub use panel::{NewRiskAssessmentPage, NewSupportPlanPage};
