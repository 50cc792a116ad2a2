mod common;

use consultant_marketplace_api::{
    dto::admin::{ApproveConsultantRequest, RejectConsultantRequest},
    entity::enums::UserRole,
    error::AppError,
    routes::params::{AdminConsultantQuery, ApprovalFilter, ConsultantSearchQuery},
    services::{admin_service, consultant_service},
};

#[tokio::test]
async fn admin_approves_and_rejects_applications() -> anyhow::Result<()> {
    let Some(state) = common::database_state().await? else {
        return Ok(());
    };

    let admin_id = common::create_user(&state, "admin", UserRole::Admin).await?;
    let client_id = common::create_user(&state, "client", UserRole::Client).await?;
    let applicant = common::create_user(&state, "applicant", UserRole::Consultant).await?;
    let rejected = common::create_user(&state, "rejected", UserRole::Consultant).await?;
    consultant_service::upsert_profile(&state, common::profile_request(applicant, 99, 299)).await?;
    consultant_service::upsert_profile(&state, common::profile_request(rejected, 99, 199)).await?;

    let err = admin_service::dashboard_stats(&state, client_id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let pending = admin_service::list_consultants(
        &state,
        AdminConsultantQuery {
            admin_id,
            approval: Some(ApprovalFilter::Pending),
            page: Some(1),
            limit: Some(100),
        },
    )
    .await?;
    assert!(pending.items.iter().any(|a| a.user.id == applicant));
    assert!(pending.items.iter().all(|a| !a.profile.is_approved));

    let approved = admin_service::approve_consultant(
        &state,
        applicant,
        ApproveConsultantRequest { admin_id },
    )
    .await?
    .data;
    assert!(approved.is_approved);
    assert!(approved.approval_date.is_some());

    let err = admin_service::approve_consultant(
        &state,
        applicant,
        ApproveConsultantRequest { admin_id },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = admin_service::reject_consultant(
        &state,
        rejected,
        RejectConsultantRequest {
            admin_id,
            reason: "  ".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    admin_service::reject_consultant(
        &state,
        rejected,
        RejectConsultantRequest {
            admin_id,
            reason: "Incomplete qualifications".into(),
        },
    )
    .await?;

    let (action, reason): (String, Option<String>) = sqlx::query_as(
        r#"
        SELECT action, metadata->>'reason'
        FROM audit_logs
        WHERE actor_id = $1 AND action = 'reject_consultant'
        "#,
    )
    .bind(admin_id)
    .fetch_one(&state.pool)
    .await?;
    assert_eq!(action, "reject_consultant");
    assert_eq!(reason.as_deref(), Some("Incomplete qualifications"));

    // Approved consultant is now discoverable, the rejected one is gone.
    let found = consultant_service::list_consultants(
        &state,
        ConsultantSearchQuery {
            category: Some("career".into()),
            limit: Some(100),
            ..Default::default()
        },
    )
    .await?;
    assert!(found.items.iter().any(|c| c.id == applicant && c.total_reviews == 0));
    assert!(found.items.iter().all(|c| c.id != rejected));

    let stats = admin_service::dashboard_stats(&state, admin_id).await?.data;
    assert!(stats.total_users >= 4);
    assert!(stats.total_consultants >= 2);

    Ok(())
}
