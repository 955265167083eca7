//! Save service - named save records scoped to a campaign

use std::sync::Arc;

use uuid::Uuid;

use loreline_protocol::SaveRecordData;

use crate::application::error::ServiceError;
use crate::ports::outbound::ApiPort;

pub struct SaveService {
    api: Arc<dyn ApiPort>,
    campaign_id: Uuid,
}

impl SaveService {
    pub fn new(api: Arc<dyn ApiPort>, campaign_id: Uuid) -> Self {
        Self { api, campaign_id }
    }

    pub async fn create(&self, name: &str) -> Result<SaveRecordData, ServiceError> {
        Ok(self.api.create_save(self.campaign_id, name).await?)
    }

    pub async fn list(&self) -> Result<Vec<SaveRecordData>, ServiceError> {
        Ok(self.api.list_saves(self.campaign_id).await?)
    }

    pub async fn get(&self, save_id: &str) -> Result<SaveRecordData, ServiceError> {
        Ok(self.api.get_save(save_id).await?)
    }

    pub async fn delete(&self, save_id: &str) -> Result<(), ServiceError> {
        Ok(self.api.delete_save(save_id).await?)
    }
}
