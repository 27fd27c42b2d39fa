//! Closure periods service

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::AppResult,
    models::closure::{ClosurePeriod, CreateClosurePeriod, UpdateClosurePeriod},
    repository::Repository,
};

#[derive(Clone)]
pub struct ClosuresService {
    repository: Repository,
}

impl ClosuresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<ClosurePeriod>> {
        self.repository.closures.list(start_date, end_date).await
    }

    pub async fn get(&self, id: i32) -> AppResult<ClosurePeriod> {
        self.repository.closures.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateClosurePeriod) -> AppResult<ClosurePeriod> {
        data.validate()?;
        let period = self.repository.closures.create(data).await?;
        tracing::info!(
            closure_id = period.id,
            "Closure {}..={} added (checkout permitted: {})",
            period.date_from,
            period.date_to,
            period.allows_checkout()
        );
        Ok(period)
    }

    pub async fn update(&self, id: i32, data: &UpdateClosurePeriod) -> AppResult<ClosurePeriod> {
        data.validate()?;
        self.repository.closures.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.closures.delete(id).await?;
        tracing::info!(closure_id = id, "Closure removed");
        Ok(())
    }
}
