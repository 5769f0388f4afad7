mod common;

use color_eyre::Result;
use common::TestContext;
use sharing_services::api::error::SharingError;
use sharing_services::api::friendship::service::request_friendship;
use sharing_services::api::group::service::{
    add_member, create_group, get_group, is_member, list_groups, list_member_ids, remove_member,
};

#[tokio::test]
async fn group_names_are_unique_per_owner() -> Result<()> {
    let ctx = TestContext::new().await?;
    let alice = ctx.profile("alice").await?;
    let bob = ctx.profile("bob").await?;

    let family = create_group(&ctx.pool, alice, "family").await?;
    assert_eq!(family.owner_id, alice);
    assert_eq!(get_group(&ctx.pool, family.id).await?.name, "family");

    let duplicate = create_group(&ctx.pool, alice, "family").await;
    assert!(matches!(duplicate, Err(SharingError::AlreadyExists(_))));

    let empty = create_group(&ctx.pool, alice, "   ").await;
    assert!(matches!(empty, Err(SharingError::BadRequest(_))));
    let padded = create_group(&ctx.pool, alice, " family ").await;
    assert!(matches!(padded, Err(SharingError::AlreadyExists(_))));

    // Another owner may reuse the name.
    create_group(&ctx.pool, bob, "family").await?;
    create_group(&ctx.pool, alice, "work").await?;

    let names: Vec<String> = list_groups(&ctx.pool, alice)
        .await?
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names, vec!["family".to_string(), "work".to_string()]);
    Ok(())
}

#[tokio::test]
async fn add_member_requires_any_friendship_with_owner() -> Result<()> {
    let ctx = TestContext::new().await?;
    let owner = ctx.profile("owner").await?;
    let profile = ctx.profile("profile").await?;
    let group = create_group(&ctx.pool, owner, "hiking").await?;

    // No friendship record yet.
    let rejected = add_member(&ctx.pool, owner, group.id, profile).await;
    assert!(matches!(rejected, Err(SharingError::PermissionDenied(_))));
    assert!(!is_member(&ctx.pool, group.id, profile).await?);

    // An unconfirmed request from the profile is enough.
    request_friendship(&ctx.pool, profile, owner).await?;
    add_member(&ctx.pool, owner, group.id, profile).await?;

    assert!(is_member(&ctx.pool, group.id, profile).await?);
    assert_eq!(list_member_ids(&ctx.pool, group.id).await?, vec![profile]);
    Ok(())
}

#[tokio::test]
async fn owner_side_request_is_enough_for_membership() -> Result<()> {
    let ctx = TestContext::new().await?;
    let owner = ctx.profile("owner").await?;
    let profile = ctx.profile("profile").await?;
    let group = create_group(&ctx.pool, owner, "hiking").await?;

    request_friendship(&ctx.pool, owner, profile).await?;
    add_member(&ctx.pool, owner, group.id, profile).await?;

    assert!(is_member(&ctx.pool, group.id, profile).await?);
    Ok(())
}

#[tokio::test]
async fn add_member_rejects_duplicates() -> Result<()> {
    let ctx = TestContext::new().await?;
    let owner = ctx.profile("owner").await?;
    let friend = ctx.profile("friend").await?;
    ctx.befriend(owner, friend).await?;
    let group = create_group(&ctx.pool, owner, "hiking").await?;

    add_member(&ctx.pool, owner, group.id, friend).await?;
    let again = add_member(&ctx.pool, owner, group.id, friend).await;

    assert!(matches!(again, Err(SharingError::AlreadyExists(_))));
    Ok(())
}

#[tokio::test]
async fn groups_of_other_owners_are_not_found() -> Result<()> {
    let ctx = TestContext::new().await?;
    let owner = ctx.profile("owner").await?;
    let intruder = ctx.profile("intruder").await?;
    let friend = ctx.profile("friend").await?;
    ctx.befriend(owner, friend).await?;
    ctx.befriend(intruder, friend).await?;
    let group = create_group(&ctx.pool, owner, "hiking").await?;

    let foreign = add_member(&ctx.pool, intruder, group.id, friend).await;
    assert!(matches!(foreign, Err(SharingError::NotFound(_))));

    let missing = add_member(&ctx.pool, owner, group.id + 100, friend).await;
    assert!(matches!(missing, Err(SharingError::NotFound(_))));

    assert!(!is_member(&ctx.pool, group.id, friend).await?);
    Ok(())
}

#[tokio::test]
async fn remove_member_drops_membership() -> Result<()> {
    let ctx = TestContext::new().await?;
    let owner = ctx.profile("owner").await?;
    let friend = ctx.profile("friend").await?;
    ctx.befriend(owner, friend).await?;
    let group = create_group(&ctx.pool, owner, "hiking").await?;
    add_member(&ctx.pool, owner, group.id, friend).await?;

    remove_member(&ctx.pool, owner, group.id, friend).await?;
    assert!(!is_member(&ctx.pool, group.id, friend).await?);

    let not_a_member = remove_member(&ctx.pool, owner, group.id, friend).await;
    assert!(matches!(not_a_member, Err(SharingError::NotFound(_))));
    Ok(())
}
