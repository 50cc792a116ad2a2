use sea_orm::{
    ActiveEnum, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    dto::earnings::EarningSummary,
    entity::{
        earnings::{Column as EarningCol, Entity as Earnings},
        enums::EarningStatus,
    },
    error::AppResult,
    models::Earning,
    response::{ApiResponse, ListResponse},
    routes::params::EarningListQuery,
    state::AppState,
};

pub async fn list_earnings(
    state: &AppState,
    query: EarningListQuery,
) -> AppResult<ListResponse<Earning>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all().add(EarningCol::ConsultantId.eq(query.consultant_id));
    if let Some(status) = query.status {
        condition = condition.add(EarningCol::Status.eq(status));
    }

    let finder = Earnings::find()
        .filter(condition)
        .order_by_desc(EarningCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Earning::from)
        .collect();

    Ok(ListResponse::new(items, page, limit, total))
}

pub async fn earning_summary(
    state: &AppState,
    consultant_id: Uuid,
) -> AppResult<ApiResponse<EarningSummary>> {
    let rows: Vec<(String, i64, i64)> = sqlx::query_as(
        r#"
        SELECT status, COALESCE(SUM(amount), 0)::bigint, COALESCE(SUM(commission), 0)::bigint
        FROM earnings
        WHERE consultant_id = $1
        GROUP BY status
        "#,
    )
    .bind(consultant_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(
        "Earning summary",
        summarize(consultant_id, &rows),
    ))
}

fn summarize(consultant_id: Uuid, rows: &[(String, i64, i64)]) -> EarningSummary {
    let mut summary = EarningSummary {
        consultant_id,
        ..Default::default()
    };
    for (status, amount, commission) in rows {
        match EarningStatus::try_from_value(status) {
            Ok(EarningStatus::Pending) => summary.pending += amount,
            Ok(EarningStatus::Held) => summary.held += amount,
            Ok(EarningStatus::Paid) => summary.paid += amount,
            Err(_) => {
                tracing::warn!(%status, "unknown earning status in ledger");
                continue;
            }
        }
        summary.total_commission += commission;
    }
    summary
}
