//! HR back-office pages. Each list is a thin module over the shared CRUD
//! panel: a form type, its validation, the table cells and the dialog
//! fields.

pub mod attendance;
pub mod department;
pub mod designation;
pub mod device;
pub mod home;
pub mod notice;
pub mod pending_hiring;
pub mod shift;
pub mod vacancy;

pub use attendance::AttendancePage;
pub use department::DepartmentPage;
pub use designation::DesignationPage;
pub use device::DevicePage;
pub use home::HrHomePage;
pub use notice::NoticePage;
pub use pending_hiring::PendingHiringPage;
pub use shift::{ShiftCreatePage, ShiftPage};
pub use vacancy::VacancyPage;
