pub mod extra_call;
pub mod panel;
pub mod timeline;
pub mod view_model;

pub use panel::{DayPlannerPage, ExtraCallPage};
