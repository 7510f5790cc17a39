//! Statement HTTP handler.
//!
//! - GET /api/v1/statement?account_id=&start_date=&end_date=

use crate::{
    AppState,
    error::AppError,
    models::transfer::{StatementQuery, Transfer},
    validation,
};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, NaiveTime, Utc};

/// List transfers involving an account within an inclusive date range.
///
/// Returns every transfer where the account is either source or
/// destination, newest first. The range may span at most 365 days.
pub async fn get_statement(
    State(state): State<AppState>,
    Query(query): Query<StatementQuery>,
) -> Result<Json<Vec<Transfer>>, AppError> {
    if !validation::is_valid_date_range(query.start_date, query.end_date) {
        return Err(AppError::InvalidRequest(
            "Statement range must be well-ordered and span at most 365 days".to_string(),
        ));
    }

    let start = query.start_date.and_time(NaiveTime::MIN).and_utc();
    // Half-open upper bound: midnight after the inclusive end date.
    let end = query
        .end_date
        .succ_opt()
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let transfers = sqlx::query_as::<_, Transfer>(
        r#"
        SELECT id, from_account_id, to_account_id, amount, created_at
        FROM transfers
        WHERE (from_account_id = $1 OR to_account_id = $1)
          AND created_at >= $2
          AND created_at < $3
        ORDER BY created_at DESC
        "#,
    )
    .bind(query.account_id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(transfers))
}
