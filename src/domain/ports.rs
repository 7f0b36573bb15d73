use crate::domain::model::{BreachRecord, ValidationReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn cdn_base(&self) -> &str;
    fn limit(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn fetch(&self) -> Result<Vec<BreachRecord>>;
    async fn normalize(&self, records: Vec<BreachRecord>) -> Result<Vec<BreachRecord>>;
    async fn validate(&self, records: Vec<BreachRecord>) -> Result<ValidationReport>;
}
