//! Shared machinery for the HR and planner list pages.

pub mod form;
pub mod options;
pub mod panel;
pub mod repository;
pub mod view_model;

pub use form::{RecordForm, SubmitError};
pub use panel::{input_class, text_input, CrudPanel, Field};
pub use repository::{CrudRepository, FixtureStore};
pub use view_model::CrudViewModel;
