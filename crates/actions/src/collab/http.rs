use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::{ApiError, CreateWorkspaceRequest, UpdateWorkspaceRequest, WorkspaceApi};
use crate::state::{WorkspaceId, WorkspaceSummary};

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error_data: Option<serde_json::Value>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_data(self) -> Result<T, ApiError> {
        if self.success {
            self.data
                .ok_or_else(|| ApiError::new("No data in response"))
        } else {
            Err(ApiError::new(
                self.message.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::new(err.to_string())
    }
}

pub struct HttpWorkspaceApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWorkspaceApi {
    pub fn new(port: u16) -> Self {
        Self::with_base_url(format!("http://127.0.0.1:{}", port))
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn health_check(&self) -> Result<(), ApiError> {
        let url = format!("{}/api/health", self.base_url);
        self.client.get(&url).send().await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response: ApiResponse<T> = self.client.get(&url).send().await?.json().await?;
        response.into_data()
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response: ApiResponse<T> =
            self.client.post(&url).json(body).send().await?.json().await?;
        response.into_data()
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response: ApiResponse<T> =
            self.client.put(&url).json(body).send().await?.json().await?;
        response.into_data()
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response: ApiResponse<()> = self.client.delete(&url).send().await?.json().await?;
        if response.success {
            Ok(())
        } else {
            Err(ApiError::new(
                response.message.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}

#[async_trait]
impl WorkspaceApi for HttpWorkspaceApi {
    async fn list_workspaces(&self) -> Result<Vec<WorkspaceSummary>, ApiError> {
        self.get("/api/workspaces").await
    }

    async fn get_workspace(&self, id: WorkspaceId) -> Result<WorkspaceSummary, ApiError> {
        self.get(&format!("/api/workspaces/{}", id)).await
    }

    async fn create_workspace(
        &self,
        create: CreateWorkspaceRequest,
    ) -> Result<WorkspaceSummary, ApiError> {
        self.post("/api/workspaces", &create).await
    }

    async fn duplicate_workspace(&self, id: WorkspaceId) -> Result<WorkspaceSummary, ApiError> {
        self.post(&format!("/api/workspaces/{}/duplicate", id), &serde_json::json!({}))
            .await
    }

    async fn update_workspace(
        &self,
        id: WorkspaceId,
        update: UpdateWorkspaceRequest,
    ) -> Result<WorkspaceSummary, ApiError> {
        self.put(&format!("/api/workspaces/{}", id), &update).await
    }

    async fn delete_workspace(&self, id: WorkspaceId) -> Result<(), ApiError> {
        self.delete(&format!("/api/workspaces/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_with_data() {
        let raw = r#"{"success":true,"data":42,"error_data":null,"message":null}"#;
        let response: ApiResponse<u32> = serde_json::from_str(raw).unwrap();
        assert_eq!(response.into_data().unwrap(), 42);
    }

    #[test]
    fn test_envelope_failure_carries_message() {
        let raw = r#"{"success":false,"data":null,"error_data":null,"message":"workspace not found"}"#;
        let response: ApiResponse<u32> = serde_json::from_str(raw).unwrap();
        let err = response.into_data().unwrap_err();
        assert_eq!(err.message, "workspace not found");
    }

    #[test]
    fn test_envelope_success_without_data_is_error() {
        let raw = r#"{"success":true,"data":null,"error_data":null,"message":null}"#;
        let response: ApiResponse<u32> = serde_json::from_str(raw).unwrap();
        assert!(response.into_data().is_err());
    }

    #[test]
    fn test_update_request_skips_unset_fields() {
        let update = UpdateWorkspaceRequest {
            pinned: Some(true),
            ..Default::default()
        };
        let raw = serde_json::to_string(&update).unwrap();
        assert_eq!(raw, r#"{"pinned":true}"#);
    }
}
