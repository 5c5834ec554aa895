use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::model::{Expense, Goal, Income, NewExpense, NewGoal, NewIncome, RecordId};

async fn list<T: DeserializeOwned>(client: &ApiClient, what: &str, path: &str) -> Result<Vec<T>, ApiError> {
    log::info!("Requesting {what}...");
    let records = client.get(path).await?;
    log::info!("Requesting {what}...done");
    Ok(records)
}

async fn add<T: DeserializeOwned, B: Serialize + Sync>(
    client: &ApiClient,
    what: &str,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    log::info!("Adding {what}...");
    let record = client.post(path, body).await?;
    log::info!("Adding {what}...done");
    Ok(record)
}

async fn update<T: DeserializeOwned, B: Serialize + Sync>(
    client: &ApiClient,
    what: &str,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    log::info!("Updating {what}...");
    let record = client.put(path, body).await?;
    log::info!("Updating {what}...done");
    Ok(record)
}

async fn remove(client: &ApiClient, what: &str, path: &str) -> Result<(), ApiError> {
    log::info!("Deleting {what}...");
    client.delete(path).await?;
    log::info!("Deleting {what}...done");
    Ok(())
}

/// Expenses are listed per user, the user id comes from the token claims.
pub async fn list_expenses(client: &ApiClient, user_id: &str) -> Result<Vec<Expense>, ApiError> {
    list(client, "expenses", &format!("/expenses/{user_id}")).await
}

pub async fn add_expense(client: &ApiClient, expense: &NewExpense) -> Result<Expense, ApiError> {
    add(client, "expense", "/expenses", expense).await
}

pub async fn update_expense(
    client: &ApiClient,
    id: &RecordId,
    expense: &NewExpense,
) -> Result<Expense, ApiError> {
    update(client, "expense", &format!("/expenses/{id}"), expense).await
}

pub async fn delete_expense(client: &ApiClient, id: &RecordId) -> Result<(), ApiError> {
    remove(client, "expense", &format!("/expenses/{id}")).await
}

pub async fn list_incomes(client: &ApiClient, user_id: &str) -> Result<Vec<Income>, ApiError> {
    list(client, "incomes", &format!("/incomes/{user_id}")).await
}

pub async fn add_income(client: &ApiClient, income: &NewIncome) -> Result<Income, ApiError> {
    add(client, "income", "/incomes", income).await
}

pub async fn update_income(
    client: &ApiClient,
    id: &RecordId,
    income: &NewIncome,
) -> Result<Income, ApiError> {
    update(client, "income", &format!("/incomes/{id}"), income).await
}

pub async fn delete_income(client: &ApiClient, id: &RecordId) -> Result<(), ApiError> {
    remove(client, "income", &format!("/incomes/{id}")).await
}

/// Goals are scoped to the token's user by the Record Store itself.
pub async fn list_goals(client: &ApiClient) -> Result<Vec<Goal>, ApiError> {
    list(client, "goals", "/goals").await
}

pub async fn add_goal(client: &ApiClient, goal: &NewGoal) -> Result<Goal, ApiError> {
    add(client, "goal", "/goals", goal).await
}

pub async fn update_goal(client: &ApiClient, id: &RecordId, goal: &NewGoal) -> Result<Goal, ApiError> {
    update(client, "goal", &format!("/goals/{id}"), goal).await
}

pub async fn delete_goal(client: &ApiClient, id: &RecordId) -> Result<(), ApiError> {
    remove(client, "goal", &format!("/goals/{id}")).await
}
