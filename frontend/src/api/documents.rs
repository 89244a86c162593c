use super::{
    client::ApiClient,
    records::{CreateDocumentRequest, DocumentDecision, DocumentRequest, DocumentRequestStatus},
    types::{ApiError, ListPage},
};

pub fn review_params(
    status: Option<DocumentRequestStatus>,
    page: u32,
    limit: u32,
) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if let Some(status) = status {
        params.push(("status".to_string(), status.as_str().to_string()));
    }
    params.push(("page".to_string(), page.max(1).to_string()));
    params.push(("limit".to_string(), limit.to_string()));
    params
}

impl ApiClient {
    pub async fn create_document_request(
        &self,
        payload: &CreateDocumentRequest,
    ) -> Result<DocumentRequest, ApiError> {
        self.post_json("/document-requests", payload).await
    }

    pub async fn my_document_requests(&self) -> Result<Vec<DocumentRequest>, ApiError> {
        self.get_json("/document-requests/me", &[]).await
    }

    pub async fn list_document_requests(
        &self,
        status: Option<DocumentRequestStatus>,
        page: u32,
        limit: u32,
    ) -> Result<ListPage<DocumentRequest>, ApiError> {
        self.get_json("/document-requests", &review_params(status, page, limit))
            .await
    }

    pub async fn decide_document_request(
        &self,
        id: &str,
        decision: &DocumentDecision,
    ) -> Result<DocumentRequest, ApiError> {
        self.patch_json(&format!("/document-requests/{}", id), decision)
            .await
    }
}
