use serde_json::json;

use super::{
    client::ApiClient,
    records::HrRecord,
    types::{ApiError, ListPage, ListQuery, RecordStatus},
};

fn record_path<T: HrRecord>(id: &str) -> String {
    format!("{}/{}", T::ENDPOINT, id)
}

impl ApiClient {
    pub async fn list_records<T: HrRecord>(
        &self,
        query: &ListQuery,
    ) -> Result<ListPage<T>, ApiError> {
        self.get_json(T::ENDPOINT, &query.to_params()).await
    }

    pub async fn create_record<T: HrRecord>(&self, payload: &T::Payload) -> Result<T, ApiError> {
        self.post_json(T::ENDPOINT, payload).await
    }

    /// Edits send the whole record body, not a diff.
    pub async fn update_record<T: HrRecord>(
        &self,
        id: &str,
        payload: &T::Payload,
    ) -> Result<T, ApiError> {
        self.patch_json(&record_path::<T>(id), payload).await
    }

    pub async fn update_record_status<T: HrRecord>(
        &self,
        id: &str,
        status: RecordStatus,
    ) -> Result<T, ApiError> {
        self.patch_json(&record_path::<T>(id), &json!({ "status": status }))
            .await
    }

    pub async fn delete_record<T: HrRecord>(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&record_path::<T>(id)).await
    }
}
