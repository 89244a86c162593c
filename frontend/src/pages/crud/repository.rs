use crate::api::{ApiClient, ApiError, HrRecord, ListMeta, ListPage, ListQuery, RecordStatus};
use std::cell::RefCell;
use std::rc::Rc;

/// Builds a record from its form payload when no server assigns the id.
pub type BuildRecord<T> = fn(String, &<T as HrRecord>::Payload) -> T;

/// In-memory rows standing in for endpoints the backend does not serve yet.
#[derive(Clone)]
pub struct FixtureStore<T: HrRecord> {
    rows: Rc<RefCell<Vec<T>>>,
    build: BuildRecord<T>,
}

impl<T: HrRecord> FixtureStore<T> {
    pub fn new(rows: Vec<T>, build: BuildRecord<T>) -> Self {
        Self {
            rows: Rc::new(RefCell::new(rows)),
            build,
        }
    }

    pub fn rows(&self) -> Vec<T> {
        self.rows.borrow().clone()
    }

    fn list(&self, query: &ListQuery) -> ListPage<T> {
        let matching: Vec<T> = self
            .rows
            .borrow()
            .iter()
            .filter(|row| row.matches(&query.search_term))
            .cloned()
            .collect();
        paginate(matching, query)
    }

    fn create(&self, payload: &T::Payload) -> T {
        let record = (self.build)(uuid::Uuid::new_v4().to_string(), payload);
        self.rows.borrow_mut().push(record.clone());
        record
    }

    fn update(&self, id: &str, payload: &T::Payload) -> Result<T, ApiError> {
        let mut rows = self.rows.borrow_mut();
        let row = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| not_found(id))?;
        *row = (self.build)(id.to_string(), payload);
        Ok(row.clone())
    }

    fn set_status(&self, id: &str, status: RecordStatus) -> Result<T, ApiError> {
        let mut rows = self.rows.borrow_mut();
        let row = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| not_found(id))?;
        row.set_status(status);
        Ok(row.clone())
    }

    fn delete(&self, id: &str) -> Result<(), ApiError> {
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        if rows.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: &str) -> ApiError {
    ApiError::not_found(format!("Record {} not found", id))
}

/// Slices `rows` the way the list endpoints do.
pub fn paginate<T>(rows: Vec<T>, query: &ListQuery) -> ListPage<T> {
    let total = rows.len() as u64;
    let limit = query.limit.max(1);
    let total_page = ((total + u64::from(limit) - 1) / u64::from(limit)) as u32;
    let skip = (query.page.max(1) - 1) as usize * limit as usize;
    let result = rows.into_iter().skip(skip).take(limit as usize).collect();
    ListPage {
        result,
        meta: ListMeta {
            page: Some(query.page.max(1)),
            limit: Some(limit),
            total: Some(total),
            total_page,
        },
    }
}

#[derive(Clone)]
enum Source<T: HrRecord> {
    Remote(Rc<ApiClient>),
    Fixture(FixtureStore<T>),
}

/// List and mutation calls for one record type, whichever source backs it.
#[derive(Clone)]
pub struct CrudRepository<T: HrRecord> {
    source: Source<T>,
}

impl<T: HrRecord> CrudRepository<T> {
    pub fn remote(api: ApiClient) -> Self {
        Self {
            source: Source::Remote(Rc::new(api)),
        }
    }

    pub fn fixture(store: FixtureStore<T>) -> Self {
        Self {
            source: Source::Fixture(store),
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<ListPage<T>, ApiError> {
        match &self.source {
            Source::Remote(api) => api.list_records::<T>(query).await,
            Source::Fixture(store) => Ok(store.list(query)),
        }
    }

    pub async fn create(&self, payload: &T::Payload) -> Result<T, ApiError> {
        match &self.source {
            Source::Remote(api) => api.create_record::<T>(payload).await,
            Source::Fixture(store) => Ok(store.create(payload)),
        }
    }

    pub async fn update(&self, id: &str, payload: &T::Payload) -> Result<T, ApiError> {
        match &self.source {
            Source::Remote(api) => api.update_record::<T>(id, payload).await,
            Source::Fixture(store) => store.update(id, payload),
        }
    }

    pub async fn set_status(&self, id: &str, status: RecordStatus) -> Result<T, ApiError> {
        match &self.source {
            Source::Remote(api) => api.update_record_status::<T>(id, status).await,
            Source::Fixture(store) => store.set_status(id, status),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        match &self.source {
            Source::Remote(api) => api.delete_record::<T>(id).await,
            Source::Fixture(store) => store.delete(id),
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::api::{Department, Device, DevicePayload};
    use serde_json::json;

    fn devices() -> FixtureStore<Device> {
        let rows = (1..=12)
            .map(|n| Device {
                id: format!("dev-{}", n),
                name: format!("Tablet {:02}", n),
                serial_number: format!("SN-{:04}", n),
                assigned_to: None,
                status: RecordStatus::Active,
            })
            .collect();
        FixtureStore::new(rows, Device::from_payload)
    }

    #[test]
    fn paginate_reports_total_pages() {
        let page = paginate((1..=25).collect::<Vec<u32>>(), &ListQuery::default().with_page(3));
        assert_eq!(page.result, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.meta.total_page, 3);
        assert_eq!(page.meta.total, Some(25));

        let empty = paginate(Vec::<u32>::new(), &ListQuery::default());
        assert!(empty.result.is_empty());
        assert_eq!(empty.total_pages(), 1);
    }

    #[tokio::test]
    async fn fixture_source_searches_and_pages() {
        let repo = CrudRepository::fixture(devices());

        let first = repo.list(&ListQuery::default()).await.unwrap();
        assert_eq!(first.result.len(), 10);
        assert_eq!(first.meta.total_page, 2);

        let found = repo
            .list(&ListQuery::default().with_search("sn-0012"))
            .await
            .unwrap();
        assert_eq!(found.result.len(), 1);
        assert_eq!(found.result[0].id, "dev-12");
    }

    #[tokio::test]
    async fn fixture_source_mutates_in_memory() {
        let store = devices();
        let repo = CrudRepository::fixture(store.clone());
        let payload = DevicePayload {
            name: "Phone".into(),
            serial_number: "PH-1".into(),
            assigned_to: None,
            status: RecordStatus::Active,
        };

        let created = repo.create(&payload).await.unwrap();
        assert_eq!(store.rows().len(), 13);

        let toggled = repo
            .set_status(&created.id, RecordStatus::Inactive)
            .await
            .unwrap();
        assert_eq!(toggled.status, RecordStatus::Inactive);

        repo.delete("dev-1").await.unwrap();
        assert_eq!(store.rows().len(), 12);
        let err = repo.delete("dev-1").await.unwrap_err();
        assert_eq!(err.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn remote_source_issues_one_list_call_per_query() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/hr/department");
            then.status(200).json_body(json!({
                "data": { "result": [], "meta": { "page": 2, "limit": 20, "total": 0, "totalPage": 0 } }
            }));
        });
        let repo = CrudRepository::<Department>::remote(ApiClient::new_with_base_url(
            server.url("/api/v1"),
        ));

        let query = ListQuery::default().with_limit(20).with_page(2);
        repo.list(&query).await.unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query.get("page").map(String::as_str), Some("2"));
        assert_eq!(requests[0].query.get("limit").map(String::as_str), Some("20"));
    }
}
