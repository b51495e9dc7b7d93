use crate::error::AppError;
use crate::models::Model;
use crate::repositories::RosterStore;
use runway_platform_shared::ModelStatus;
use tracing::info;
use uuid::Uuid;


/// Credit ledger adjustments on roster members.
///
/// Deltas are signed; a removal larger than the current balance floors
/// the balance at zero rather than going negative. That policy is
/// applied in a single atomic update so repeated calls always agree.
#[derive(Clone)]
pub struct CreditService<S> {
    store: S,
}

impl<S> CreditService<S>
where
    S: RosterStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn get_model(&self, model_id: Uuid) -> Result<Model, AppError> {
        self.store
            .find_model(model_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Model not found".to_string()))
    }

    pub async fn adjust_credits(&self, model_id: Uuid, delta: i64) -> Result<i64, AppError> {
        if delta == 0 {
            return Err(AppError::Validation(
                "Credit delta must be non-zero".to_string(),
            ));
        }

        let credits = self
            .store
            .adjust_model_credits(model_id, delta)
            .await?
            .ok_or_else(|| AppError::NotFound("Model not found".to_string()))?;

        info!(%model_id, delta, credits, "credit balance adjusted");

        Ok(credits)
    }

    pub async fn set_status(&self, model_id: Uuid, status: ModelStatus) -> Result<Model, AppError> {
        let model = self
            .store
            .set_model_status(model_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Model not found".to_string()))?;

        info!(%model_id, %status, "roster status updated");

        Ok(model)
    }
}
