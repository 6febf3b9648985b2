use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{CreateDocumentRequest, DocumentList};
use super::{AppwriteClient, BackendResult, Query};

fn documents_path(database_id: &str, collection_id: &str) -> String {
    format!("/databases/{database_id}/collections/{collection_id}/documents")
}

impl AppwriteClient {
    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> BackendResult<DocumentList<T>> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", query.to_param()))
            .collect();
        let builder = self
            .request(Method::GET, &documents_path(database_id, collection_id))
            .query(&params);
        let list: DocumentList<T> = self.send("document list", builder).await?;
        tracing::debug!(
            collection_id,
            total = list.total,
            returned = list.documents.len(),
            "listed documents"
        );
        Ok(list)
    }

    pub async fn create_document<T: DeserializeOwned, D: Serialize>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &D,
    ) -> BackendResult<T> {
        let request = CreateDocumentRequest { document_id, data };
        let builder = self
            .request(Method::POST, &documents_path(database_id, collection_id))
            .json(&request);
        self.send("document", builder).await
    }
}
