//! Seed rows for the lists that have no backend endpoint yet: devices,
//! service funders and service users.

use crate::api::{Device, FundingType, RecordStatus, ServiceFunder, ServiceUser};

fn device(n: u32, name: &str, assigned_to: Option<&str>, status: RecordStatus) -> Device {
    Device {
        id: format!("device-{}", n),
        name: name.to_string(),
        serial_number: format!("PP-{:05}", 10_000 + n * 37),
        assigned_to: assigned_to.map(str::to_string),
        status,
    }
}

pub fn devices() -> Vec<Device> {
    vec![
        device(1, "Galaxy Tab A8", Some("Casey Carer"), RecordStatus::Active),
        device(2, "Galaxy Tab A8", Some("Jordan Lee"), RecordStatus::Active),
        device(3, "iPad 9th gen", None, RecordStatus::Active),
        device(4, "iPad 9th gen", Some("Priya Shah"), RecordStatus::Active),
        device(5, "Moto G54", Some("Tom Evans"), RecordStatus::Active),
        device(6, "Moto G54", None, RecordStatus::Inactive),
        device(7, "Pixel 7a", Some("Amara Okafor"), RecordStatus::Active),
        device(8, "Pixel 7a", None, RecordStatus::Active),
        device(9, "Lenovo Tab M10", Some("Rhys Morgan"), RecordStatus::Active),
        device(10, "Lenovo Tab M10", None, RecordStatus::Inactive),
        device(11, "Galaxy A15", Some("Sofia Rossi"), RecordStatus::Active),
        device(12, "Galaxy A15", None, RecordStatus::Active),
    ]
}

fn funder(id: &str, name: &str, email: &str, funding_type: FundingType) -> ServiceFunder {
    ServiceFunder {
        id: id.to_string(),
        name: name.to_string(),
        contact_email: Some(email.to_string()),
        funding_type,
        status: RecordStatus::Active,
    }
}

pub fn service_funders() -> Vec<ServiceFunder> {
    vec![
        funder(
            "funder-1",
            "Leeds City Council",
            "adultcare@leeds.example.gov.uk",
            FundingType::LocalAuthority,
        ),
        funder(
            "funder-2",
            "West Yorkshire ICB",
            "chc@wy-icb.example.nhs.uk",
            FundingType::Nhs,
        ),
        funder(
            "funder-3",
            "Self funded",
            "accounts@peopleplanner.example.com",
            FundingType::Private,
        ),
        funder(
            "funder-4",
            "Age Support Trust",
            "grants@agesupport.example.org",
            FundingType::Charity,
        ),
    ]
}

fn service_user(id: &str, name: &str, initials: &str, address: &str, funder_id: &str) -> ServiceUser {
    ServiceUser {
        id: id.to_string(),
        name: name.to_string(),
        initials: initials.to_string(),
        address: Some(address.to_string()),
        funder_id: Some(funder_id.to_string()),
        status: RecordStatus::Active,
    }
}

pub fn service_users() -> Vec<ServiceUser> {
    vec![
        service_user("su-1", "Margaret Hughes", "MH", "12 Oak Lane, Leeds", "funder-1"),
        service_user("su-2", "Arthur Bennett", "AB", "4 Mill Road, Otley", "funder-2"),
        service_user("su-3", "Doris Clarke", "DC", "88 Park View, Headingley", "funder-1"),
        service_user("su-4", "Kenneth Walsh", "KW", "3 Station Street, Ilkley", "funder-3"),
        service_user("su-5", "Evelyn Price", "EP", "21 Church Walk, Horsforth", "funder-4"),
        service_user("su-6", "Harold Shaw", "HS", "7 Canal Wharf, Leeds", "funder-1"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fixture_ids_are_unique() {
        let device_ids: HashSet<_> = devices().into_iter().map(|d| d.id).collect();
        assert_eq!(device_ids.len(), devices().len());
        let user_ids: HashSet<_> = service_users().into_iter().map(|u| u.id).collect();
        assert_eq!(user_ids.len(), service_users().len());
    }

    #[test]
    fn service_users_point_at_known_funders() {
        let funders: HashSet<_> = service_funders().into_iter().map(|f| f.id).collect();
        assert!(service_users()
            .iter()
            .all(|u| u.funder_id.as_ref().map(|id| funders.contains(id)).unwrap_or(false)));
    }
}
