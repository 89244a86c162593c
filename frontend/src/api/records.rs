//! Record types served by the HR and planner endpoints.
//!
//! Every list-page entity implements [`HrRecord`], which is all the generic
//! CRUD client and the list view model need to know about it.

use chrono::{NaiveDate, NaiveTime};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::{initials_of, RecordStatus, Role};

pub trait HrRecord: Clone + PartialEq + Serialize + DeserializeOwned + 'static {
    /// Body sent on create and edit.
    type Payload: Clone + PartialEq + Serialize + 'static;

    const ENDPOINT: &'static str;

    fn id(&self) -> &str;

    /// Text shown in confirmations and matched by in-memory search.
    fn label(&self) -> &str;

    fn status(&self) -> Option<RecordStatus> {
        None
    }

    fn set_status(&mut self, _status: RecordStatus) {}

    fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty() || self.label().to_lowercase().contains(&term)
    }
}

macro_rules! status_accessors {
    () => {
        fn status(&self) -> Option<RecordStatus> {
            Some(self.status)
        }

        fn set_status(&mut self, status: RecordStatus) {
            self.status = status;
        }
    };
}

// Department

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPayload {
    pub name: String,
    pub description: Option<String>,
    pub status: RecordStatus,
}

impl HrRecord for Department {
    type Payload = DepartmentPayload;
    const ENDPOINT: &'static str = "/hr/department";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    status_accessors!();
}

// Designation

pub const PERMISSION_MODULES: &[(&str, &str)] = &[
    ("department", "Department"),
    ("designation", "Designation"),
    ("shift", "Shift"),
    ("vacancy", "Vacancy"),
    ("notice", "Notice Board"),
    ("attendance", "Attendance"),
    ("device", "Device"),
    ("pending_hiring", "Pending Hiring"),
    ("document_request", "Document Requests"),
    ("planner", "Day Planner"),
    ("service_user", "Service User"),
    ("service_funder", "Service Funder"),
    ("risk_assessment", "Risk Assessment"),
    ("support_plan", "Support Plan"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePermission {
    pub module: String,
    #[serde(default)]
    pub view: bool,
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub edit: bool,
    #[serde(default)]
    pub delete: bool,
}

impl ModulePermission {
    pub fn none(module: &str) -> Self {
        Self {
            module: module.to_string(),
            ..Self::default()
        }
    }

    pub fn grants_anything(&self) -> bool {
        self.view || self.create || self.edit || self.delete
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Designation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<ModulePermission>,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignationPayload {
    pub name: String,
    pub department_id: Option<String>,
    pub description: Option<String>,
    pub permissions: Vec<ModulePermission>,
    pub status: RecordStatus,
}

impl HrRecord for Designation {
    type Payload = DesignationPayload;
    const ENDPOINT: &'static str = "/hr/designation";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    status_accessors!();
}

// Shift

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPayload {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    /// Only set on edit; a new shift takes the server's default status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl HrRecord for Shift {
    type Payload = ShiftPayload;
    const ENDPOINT: &'static str = "/hr/shift";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    status_accessors!();
}

// Vacancy

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default = "default_positions")]
    pub positions: u32,
    #[serde(default)]
    pub closing_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

fn default_positions() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacancyPayload {
    pub title: String,
    pub department_id: Option<String>,
    pub positions: u32,
    pub closing_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub status: RecordStatus,
}

impl HrRecord for Vacancy {
    type Payload = VacancyPayload;
    const ENDPOINT: &'static str = "/hr/vacancy";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    status_accessors!();
}

// Notice

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeAudience {
    #[default]
    All,
    Department,
    Designation,
    Individual,
}

impl NoticeAudience {
    pub const ALL: [NoticeAudience; 4] = [
        NoticeAudience::All,
        NoticeAudience::Department,
        NoticeAudience::Designation,
        NoticeAudience::Individual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NoticeAudience::All => "all",
            NoticeAudience::Department => "department",
            NoticeAudience::Designation => "designation",
            NoticeAudience::Individual => "individual",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NoticeAudience::All => "Everyone",
            NoticeAudience::Department => "Department",
            NoticeAudience::Designation => "Designation",
            NoticeAudience::Individual => "Individual",
        }
    }

    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == value)
            .unwrap_or_default()
    }

    pub fn needs_targets(self) -> bool {
        self != NoticeAudience::All
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub audience: NoticeAudience,
    #[serde(default)]
    pub target_ids: Vec<String>,
    #[serde(default)]
    pub publish_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticePayload {
    pub title: String,
    pub description: String,
    pub audience: NoticeAudience,
    pub target_ids: Vec<String>,
    pub publish_date: Option<NaiveDate>,
    pub status: RecordStatus,
}

impl HrRecord for Notice {
    type Payload = NoticePayload;
    const ENDPOINT: &'static str = "/hr/notice";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    status_accessors!();
}

// Attendance

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    Leave,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::Leave,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Leave => "leave",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::Leave => "On leave",
        }
    }

    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: String,
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePayload {
    pub employee_id: String,
    pub date: NaiveDate,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: AttendanceStatus,
}

impl HrRecord for Attendance {
    type Payload = AttendancePayload;
    const ENDPOINT: &'static str = "/hr/attendance";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        self.employee_name.as_deref().unwrap_or(&self.employee_id)
    }
}

// Pending hiring

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingHire {
    pub id: String,
    pub applicant_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub vacancy_id: Option<String>,
    #[serde(default)]
    pub vacancy_title: Option<String>,
    #[serde(default)]
    pub applied_at: Option<NaiveDate>,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingHirePayload {
    pub applicant_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub vacancy_id: Option<String>,
    pub status: RecordStatus,
}

impl HrRecord for PendingHire {
    type Payload = PendingHirePayload;
    const ENDPOINT: &'static str = "/hr/pending-hiring";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.applicant_name
    }

    status_accessors!();
}

// Device (fixture backed)

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    pub serial_number: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePayload {
    pub name: String,
    pub serial_number: String,
    pub assigned_to: Option<String>,
    pub status: RecordStatus,
}

impl Device {
    pub fn from_payload(id: String, payload: &DevicePayload) -> Self {
        Self {
            id,
            name: payload.name.clone(),
            serial_number: payload.serial_number.clone(),
            assigned_to: payload.assigned_to.clone(),
            status: payload.status,
        }
    }
}

impl HrRecord for Device {
    type Payload = DevicePayload;
    const ENDPOINT: &'static str = "/devices";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    status_accessors!();

    fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.serial_number.to_lowercase().contains(&term)
    }
}

// Service funder (fixture backed)

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingType {
    #[default]
    LocalAuthority,
    Nhs,
    Private,
    Charity,
}

impl FundingType {
    pub const ALL: [FundingType; 4] = [
        FundingType::LocalAuthority,
        FundingType::Nhs,
        FundingType::Private,
        FundingType::Charity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FundingType::LocalAuthority => "local_authority",
            FundingType::Nhs => "nhs",
            FundingType::Private => "private",
            FundingType::Charity => "charity",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FundingType::LocalAuthority => "Local authority",
            FundingType::Nhs => "NHS",
            FundingType::Private => "Private",
            FundingType::Charity => "Charity",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFunder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub funding_type: FundingType,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFunderPayload {
    pub name: String,
    pub contact_email: Option<String>,
    pub funding_type: FundingType,
    pub status: RecordStatus,
}

impl ServiceFunder {
    pub fn from_payload(id: String, payload: &ServiceFunderPayload) -> Self {
        Self {
            id,
            name: payload.name.clone(),
            contact_email: payload.contact_email.clone(),
            funding_type: payload.funding_type,
            status: payload.status,
        }
    }
}

impl HrRecord for ServiceFunder {
    type Payload = ServiceFunderPayload;
    const ENDPOINT: &'static str = "/service-funders";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    status_accessors!();
}

// Service user (fixture backed)

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUser {
    pub id: String,
    pub name: String,
    pub initials: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub funder_id: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUserPayload {
    pub name: String,
    pub initials: String,
    pub address: Option<String>,
    pub funder_id: Option<String>,
    pub status: RecordStatus,
}

impl ServiceUser {
    pub fn from_payload(id: String, payload: &ServiceUserPayload) -> Self {
        let initials = if payload.initials.trim().is_empty() {
            initials_of(&payload.name)
        } else {
            payload.initials.clone()
        };
        Self {
            id,
            name: payload.name.clone(),
            initials,
            address: payload.address.clone(),
            funder_id: payload.funder_id.clone(),
            status: payload.status,
        }
    }
}

impl HrRecord for ServiceUser {
    type Payload = ServiceUserPayload;
    const ENDPOINT: &'static str = "/service-users";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    status_accessors!();
}

// Employees (carers / staff) as returned by `/users`

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

impl Employee {
    pub fn initials(&self) -> String {
        initials_of(&self.name)
    }
}

// Risk assessments and support plans

pub type Answers = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub id: String,
    pub service_user_id: String,
    #[serde(default)]
    pub service_user_name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlanPayload {
    pub service_user_id: String,
    pub title: String,
    pub answers: Answers,
}

impl HrRecord for RiskAssessment {
    type Payload = CarePlanPayload;
    const ENDPOINT: &'static str = "/risk-assessment";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    status_accessors!();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportPlan {
    pub id: String,
    pub service_user_id: String,
    #[serde(default)]
    pub service_user_name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

impl HrRecord for SupportPlan {
    type Payload = CarePlanPayload;
    const ENDPOINT: &'static str = "/support-plan";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    status_accessors!();
}

// Schedules

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Allocated,
    #[default]
    Unallocated,
}

impl ScheduleStatus {
    /// An assignee makes a visit allocated.
    pub fn for_assignee(employee_id: Option<&str>) -> Self {
        match employee_id {
            Some(id) if !id.trim().is_empty() => ScheduleStatus::Allocated,
            _ => ScheduleStatus::Unallocated,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScheduleStatus::Allocated => "Allocated",
            ScheduleStatus::Unallocated => "Unallocated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub service_user_id: Option<String>,
    #[serde(default)]
    pub service_user_name: Option<String>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub status: ScheduleStatus,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchedule {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub service_user_id: String,
    pub employee_id: Option<String>,
    pub activity: String,
    pub status: ScheduleStatus,
    pub color: Option<String>,
}

/// `HH:MM` on the wire; seconds are accepted on input and dropped.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

// Document requests

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentRequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl DocumentRequestStatus {
    pub const ALL: [DocumentRequestStatus; 3] = [
        DocumentRequestStatus::Pending,
        DocumentRequestStatus::Approved,
        DocumentRequestStatus::Rejected,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    /// Only pending requests can be decided.
    pub fn can_transition_to(self, next: DocumentRequestStatus) -> bool {
        self == DocumentRequestStatus::Pending && next != DocumentRequestStatus::Pending
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentRequestStatus::Pending => "pending",
            DocumentRequestStatus::Approved => "approved",
            DocumentRequestStatus::Rejected => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentRequestStatus::Pending => "Pending",
            DocumentRequestStatus::Approved => "Approved",
            DocumentRequestStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub id: String,
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub document_type: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: DocumentRequestStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub document_type: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDecision {
    pub status: DocumentRequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
}
