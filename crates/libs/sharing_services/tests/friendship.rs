mod common;

use color_eyre::Result;
use common::TestContext;
use sharing_services::api::error::SharingError;
use sharing_services::api::friendship::service::{
    are_friends, confirm_friendship, have_friendship, list_friends, list_pending_requests,
    request_friendship,
};

#[tokio::test]
async fn request_creates_unconfirmed_friendship() -> Result<()> {
    let ctx = TestContext::new().await?;
    let alice = ctx.profile("alice").await?;
    let bob = ctx.profile("bob").await?;

    let friendship = request_friendship(&ctx.pool, alice, bob).await?;

    assert!(!friendship.confirmed);
    assert_eq!(friendship.requester_id, alice);
    assert_eq!(friendship.requestee_id, bob);
    assert!(friendship.confirmed_at.is_none());
    assert!(are_friends(&ctx.pool, alice, bob, false).await?);
    assert!(!are_friends(&ctx.pool, alice, bob, true).await?);
    assert!(have_friendship(&ctx.pool, bob, alice).await?);
    Ok(())
}

#[tokio::test]
async fn request_in_either_direction_is_rejected_once_one_exists() -> Result<()> {
    let ctx = TestContext::new().await?;
    let alice = ctx.profile("alice").await?;
    let bob = ctx.profile("bob").await?;

    request_friendship(&ctx.pool, alice, bob).await?;

    let reverse = request_friendship(&ctx.pool, bob, alice).await;
    assert!(matches!(reverse, Err(SharingError::AlreadyExists(_))));
    let repeat = request_friendship(&ctx.pool, alice, bob).await;
    assert!(matches!(repeat, Err(SharingError::AlreadyExists(_))));

    confirm_friendship(&ctx.pool, bob, alice).await?;
    let after_confirm = request_friendship(&ctx.pool, bob, alice).await;
    assert!(matches!(after_confirm, Err(SharingError::AlreadyExists(_))));
    Ok(())
}

#[tokio::test]
async fn cannot_befriend_yourself() -> Result<()> {
    let ctx = TestContext::new().await?;
    let alice = ctx.profile("alice").await?;

    let result = request_friendship(&ctx.pool, alice, alice).await;

    assert!(matches!(result, Err(SharingError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn confirm_only_succeeds_once() -> Result<()> {
    let ctx = TestContext::new().await?;
    let alice = ctx.profile("alice").await?;
    let bob = ctx.profile("bob").await?;
    request_friendship(&ctx.pool, alice, bob).await?;

    let confirmed = confirm_friendship(&ctx.pool, bob, alice).await?;
    assert!(confirmed.confirmed);
    assert!(confirmed.confirmed_at.is_some());
    assert!(are_friends(&ctx.pool, bob, alice, true).await?);

    let again = confirm_friendship(&ctx.pool, bob, alice).await;
    assert!(matches!(again, Err(SharingError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn only_the_requestee_can_confirm() -> Result<()> {
    let ctx = TestContext::new().await?;
    let alice = ctx.profile("alice").await?;
    let bob = ctx.profile("bob").await?;
    let carol = ctx.profile("carol").await?;
    request_friendship(&ctx.pool, alice, bob).await?;

    // The requester confirming their own request.
    let by_requester = confirm_friendship(&ctx.pool, alice, bob).await;
    assert!(matches!(by_requester, Err(SharingError::NotFound(_))));
    // A bystander.
    let by_other = confirm_friendship(&ctx.pool, carol, alice).await;
    assert!(matches!(by_other, Err(SharingError::NotFound(_))));

    assert!(!are_friends(&ctx.pool, alice, bob, true).await?);
    Ok(())
}

#[tokio::test]
async fn list_friends_and_pending_requests() -> Result<()> {
    let ctx = TestContext::new().await?;
    let alice = ctx.profile("alice").await?;
    let bob = ctx.profile("bob").await?;
    let carol = ctx.profile("carol").await?;
    let dave = ctx.profile("dave").await?;

    ctx.befriend(alice, bob).await?;
    ctx.befriend(carol, alice).await?;
    request_friendship(&ctx.pool, dave, alice).await?;

    let mut friend_ids: Vec<i64> = list_friends(&ctx.pool, alice)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    friend_ids.sort_unstable();
    assert_eq!(friend_ids, vec![bob, carol]);

    let pending = list_pending_requests(&ctx.pool, alice).await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].requester_id, dave);
    assert!(list_pending_requests(&ctx.pool, dave).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_profiles_are_not_found() -> Result<()> {
    let ctx = TestContext::new().await?;
    let alice = ctx.profile("alice").await?;

    let result = request_friendship(&ctx.pool, alice, alice + 100).await;

    assert!(matches!(result, Err(SharingError::NotFound(_))));
    Ok(())
}
