use crate::{
    api::{ApiClient, ApiError, HrRecord, ListQuery, Role},
    components::option_select::{OptionsResource, SelectOption},
};
use leptos::*;

/// Page size used when a list endpoint feeds a dropdown.
pub const OPTION_LIMIT: u32 = 100;

pub fn record_options<T: HrRecord>(records: &[T]) -> Vec<SelectOption> {
    records
        .iter()
        .map(|record| SelectOption::new(record.id(), record.label()))
        .collect()
}

pub fn use_record_options<T: HrRecord>() -> OptionsResource {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    create_resource(
        || 0u32,
        move |_| {
            let api = api.clone();
            async move {
                let query = ListQuery::default().with_limit(OPTION_LIMIT);
                let page = api.list_records::<T>(&query).await?;
                Ok::<_, ApiError>(record_options(&page.result))
            }
        },
    )
}

pub fn use_employee_options(role: Role) -> OptionsResource {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    create_resource(
        || 0u32,
        move |_| {
            let api = api.clone();
            async move {
                let employees = api.list_users_by_role(role).await?;
                Ok::<_, ApiError>(
                    employees
                        .into_iter()
                        .map(|e| SelectOption::new(e.id, e.name))
                        .collect(),
                )
            }
        },
    )
}

/// Options that are already in memory, wrapped so they share the select.
pub fn use_static_options(options: Vec<SelectOption>) -> OptionsResource {
    create_resource(
        || 0u32,
        move |_| {
            let options = options.clone();
            async move { Ok::<_, ApiError>(options) }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Department, RecordStatus};

    #[test]
    fn record_options_use_id_and_label() {
        let departments = vec![Department {
            id: "d1".into(),
            name: "Care".into(),
            description: None,
            status: RecordStatus::Active,
        }];
        assert_eq!(
            record_options(&departments),
            vec![SelectOption::new("d1", "Care")]
        );
    }
}
