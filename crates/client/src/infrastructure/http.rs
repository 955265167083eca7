//! HTTP adapter for the resource API using reqwest

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use loreline_protocol::{
    CharacterPatchData, CharacterRecordData, HistoryEntryData, QuestData, SaveRecordData,
    SessionRefData, WorldEntitySetsData,
};

use crate::ports::outbound::{ApiError, ApiPort};

/// Resource API client
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;
        decode(path, response).await
    }

    async fn send_expect_ok(&self, request: reqwest::RequestBuilder, path: &str) -> Result<(), ApiError> {
        let response = request
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;
        check_status(path, &response)?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T, ApiError> {
    check_status(path, &response)?;
    response
        .json::<T>()
        .await
        .map_err(|error| ApiError::Decode(error.to_string()))
}

fn check_status(path: &str, response: &reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(path.to_string()));
    }
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl ApiPort for HttpApi {
    async fn get_character(&self, character_id: &str) -> Result<CharacterRecordData, ApiError> {
        self.get_json(&format!("/characters/{character_id}")).await
    }

    async fn update_character(
        &self,
        character_id: &str,
        patch: &CharacterPatchData,
    ) -> Result<(), ApiError> {
        let path = format!("/characters/{character_id}");
        let request = self.client.patch(self.endpoint(&path)).json(patch);
        self.send_expect_ok(request, &path).await
    }

    async fn get_world_entities(
        &self,
        campaign_id: Uuid,
    ) -> Result<WorldEntitySetsData, ApiError> {
        self.get_json(&format!("/campaigns/{campaign_id}/world")).await
    }

    async fn get_quests(&self, campaign_id: Uuid, status: &str) -> Result<Vec<QuestData>, ApiError> {
        self.get_json(&format!("/campaigns/{campaign_id}/quests?status={status}"))
            .await
    }

    async fn resolve_active_session(&self, campaign_id: Uuid) -> Result<SessionRefData, ApiError> {
        self.get_json(&format!("/campaigns/{campaign_id}/sessions/active"))
            .await
    }

    async fn get_session_history(
        &self,
        session_id: Uuid,
        limit: u32,
    ) -> Result<Vec<HistoryEntryData>, ApiError> {
        self.get_json(&format!("/sessions/{session_id}/history?limit={limit}"))
            .await
    }

    async fn create_save(&self, campaign_id: Uuid, name: &str) -> Result<SaveRecordData, ApiError> {
        let path = format!("/campaigns/{campaign_id}/saves");
        let response = self
            .client
            .post(self.endpoint(&path))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;
        decode(&path, response).await
    }

    async fn list_saves(&self, campaign_id: Uuid) -> Result<Vec<SaveRecordData>, ApiError> {
        self.get_json(&format!("/campaigns/{campaign_id}/saves")).await
    }

    async fn get_save(&self, save_id: &str) -> Result<SaveRecordData, ApiError> {
        self.get_json(&format!("/saves/{save_id}")).await
    }

    async fn delete_save(&self, save_id: &str) -> Result<(), ApiError> {
        let path = format!("/saves/{save_id}");
        let request = self.client.delete(self.endpoint(&path));
        self.send_expect_ok(request, &path).await
    }

    async fn submit_action(
        &self,
        campaign_id: Uuid,
        character_id: &str,
        action: &str,
    ) -> Result<(), ApiError> {
        let path = format!("/campaigns/{campaign_id}/actions");
        let request = self.client.post(self.endpoint(&path)).json(&serde_json::json!({
            "character_id": character_id,
            "action": action,
        }));
        self.send_expect_ok(request, &path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let api = HttpApi::new("http://127.0.0.1:8080/api/");
        assert_eq!(
            api.endpoint("/characters/c1"),
            "http://127.0.0.1:8080/api/characters/c1"
        );
    }
}
