use super::{ApiClient, ApiError};
use crate::model::MonthlyAnalytics;

/// Server side expense breakdown used by the budget comparison.
pub async fn monthly(client: &ApiClient) -> Result<MonthlyAnalytics, ApiError> {
    log::info!("Requesting monthly analytics...");
    let analytics = client.get("/analytics/monthly").await?;
    log::info!("Requesting monthly analytics...done");
    Ok(analytics)
}
