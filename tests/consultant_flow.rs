mod common;

use consultant_marketplace_api::{
    entity::{
        consultant_profiles::{Column as ProfileCol, Entity as ConsultantProfiles},
        enums::UserRole,
    },
    error::AppError,
    routes::params::ConsultantSearchQuery,
    services::consultant_service::{self, DUPLICATE_PROFILE},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

fn search(term: &str) -> ConsultantSearchQuery {
    ConsultantSearchQuery {
        search: Some(term.into()),
        limit: Some(100),
        ..Default::default()
    }
}

#[tokio::test]
async fn search_matches_wildcard_characters_literally() -> anyhow::Result<()> {
    let Some(state) = common::database_state().await? else {
        return Ok(());
    };

    let consultant_id = common::approved_consultant(&state, 99, 299).await?;

    let found = consultant_service::list_consultants(&state, search("career plan")).await?;
    assert!(found.items.iter().any(|c| c.id == consultant_id));

    for term in ["_", "%"] {
        let found = consultant_service::list_consultants(&state, search(term)).await?;
        assert!(
            found.items.iter().all(|c| c.id != consultant_id),
            "'{term}' should not match every consultant"
        );
    }

    Ok(())
}

#[tokio::test]
async fn concurrent_first_upserts_create_one_profile() -> anyhow::Result<()> {
    let Some(state) = common::database_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "consultant", UserRole::Consultant).await?;

    let (first, second) = tokio::join!(
        consultant_service::upsert_profile(&state, common::profile_request(user_id, 99, 299)),
        consultant_service::upsert_profile(&state, common::profile_request(user_id, 149, 399)),
    );
    for result in [first, second] {
        match result {
            Ok(_) => {}
            Err(AppError::BadRequest(message)) => assert_eq!(message, DUPLICATE_PROFILE),
            Err(other) => panic!("unexpected upsert error: {other:?}"),
        }
    }

    let profiles = ConsultantProfiles::find()
        .filter(ProfileCol::UserId.eq(user_id))
        .all(&state.orm)
        .await?;
    assert_eq!(profiles.len(), 1);

    Ok(())
}
