mod common;

use common::*;
use food_dispatch::confirmation::ConfirmationError;
use food_dispatch::lifecycle::DispatchSystem;
use food_dispatch::model::{OrderId, UserId};
use food_dispatch::notify::ORDER_CONFIRMATION_REQUEST;
use std::time::{Duration, Instant};

/// The food-place owner's device: waits for the request push, then runs `answer`.
fn on_confirmation_request<F, Fut, T>(system: &DispatchSystem, answer: F) -> tokio::task::JoinHandle<T>
where
    F: FnOnce(serde_json::Value) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = T> + Send,
    T: Send + 'static,
{
    let mut pushes = system.notifier.subscribe();
    tokio::spawn(async move {
        loop {
            let push = pushes.recv().await.unwrap();
            if push.event == ORDER_CONFIRMATION_REQUEST && push.user_id == OWNER {
                return answer(push.payload).await;
            }
        }
    })
}

#[tokio::test]
async fn test_confirmed_order() {
    let system = DispatchSystem::new(fast_config());
    let order = seed(&system, &[]).await;
    let engine = system.confirmation.clone();
    let owner = on_confirmation_request(&system, move |payload| async move {
        assert_eq!(payload["customer_name"], "Ada");
        assert_eq!(payload["items"][0]["name"], "Pad thai");
        assert_eq!(payload["items"][0]["quantity"], 2);
        engine.confirm_order(ORDER, OWNER).await
    });

    let confirmed = system
        .confirmation
        .request_order_confirmation(&order)
        .await
        .expect("Confirmation failed");

    assert!(confirmed);
    assert_eq!(owner.await.unwrap(), Ok(true));
    assert!(system.confirmation.waits().is_empty());
}

#[tokio::test]
async fn test_rejected_order() {
    let system = DispatchSystem::new(fast_config());
    let order = seed(&system, &[]).await;
    let engine = system.confirmation.clone();
    let owner = on_confirmation_request(&system, move |_| async move {
        engine.reject_order(ORDER, OWNER).await
    });

    let confirmed = system
        .confirmation
        .request_order_confirmation(&order)
        .await
        .unwrap();

    assert!(!confirmed);
    assert_eq!(owner.await.unwrap(), Ok(true));
    assert!(system.confirmation.waits().is_empty());
}

#[tokio::test]
async fn test_unanswered_request_times_out() {
    let timeout = Duration::from_millis(50);
    let system = DispatchSystem::new(fast_config().with_confirmation_timeout(timeout));
    let order = seed(&system, &[]).await;

    let started = Instant::now();
    let confirmed = system
        .confirmation
        .request_order_confirmation(&order)
        .await
        .unwrap();

    assert!(!confirmed);
    assert!(started.elapsed() >= timeout);
    assert!(!system.confirmation.waits().contains(ORDER));

    // The answer arrives too late to matter.
    assert_eq!(system.confirmation.confirm_order(ORDER, OWNER).await, Ok(false));
}

#[tokio::test]
async fn test_wrong_user_cannot_confirm() {
    let system = DispatchSystem::new(fast_config());
    let order = seed(&system, &[]).await;
    let engine = system.confirmation.clone();
    let owner = on_confirmation_request(&system, move |_| async move {
        let by_customer = engine.confirm_order(ORDER, CUSTOMER).await;
        let by_stranger = engine.reject_order(ORDER, UserId(999)).await;
        let by_owner = engine.confirm_order(ORDER, OWNER).await;
        (by_customer, by_stranger, by_owner)
    });

    let confirmed = system
        .confirmation
        .request_order_confirmation(&order)
        .await
        .unwrap();
    let (by_customer, by_stranger, by_owner) = owner.await.unwrap();

    assert_eq!(by_customer, Ok(false));
    assert_eq!(by_stranger, Ok(false));
    assert_eq!(by_owner, Ok(true));
    assert!(confirmed);
}

#[tokio::test]
async fn test_second_answer_is_ignored() {
    let system = DispatchSystem::new(fast_config());
    let order = seed(&system, &[]).await;
    let engine = system.confirmation.clone();
    let owner = on_confirmation_request(&system, move |_| async move {
        let first = engine.reject_order(ORDER, OWNER).await;
        let second = engine.confirm_order(ORDER, OWNER).await;
        (first, second)
    });

    let confirmed = system
        .confirmation
        .request_order_confirmation(&order)
        .await
        .unwrap();

    assert!(!confirmed);
    assert_eq!(owner.await.unwrap(), (Ok(true), Ok(false)));
}

#[tokio::test]
async fn test_answer_without_pending_request_returns_false() {
    let system = DispatchSystem::new(fast_config());
    seed(&system, &[]).await;

    assert_eq!(system.confirmation.confirm_order(ORDER, OWNER).await, Ok(false));
    assert_eq!(system.confirmation.reject_order(ORDER, OWNER).await, Ok(false));
}

#[tokio::test]
async fn test_answer_for_unknown_order_is_an_error() {
    let system = DispatchSystem::new(fast_config());
    seed(&system, &[]).await;

    assert_eq!(
        system.confirmation.confirm_order(OrderId(404), OWNER).await,
        Err(ConfirmationError::OrderNotFound(OrderId(404)))
    );
}

#[tokio::test]
async fn test_duplicate_request_is_rejected() {
    let system = DispatchSystem::new(fast_config().with_confirmation_timeout(Duration::from_millis(300)));
    let order = seed(&system, &[]).await;

    let engine = system.confirmation.clone();
    let first_order = order.clone();
    let first = tokio::spawn(async move { engine.request_order_confirmation(&first_order).await });

    wait_until(|| system.confirmation.waits().contains(ORDER)).await;
    assert_eq!(
        system.confirmation.request_order_confirmation(&order).await,
        Err(ConfirmationError::AlreadyPending(ORDER))
    );

    assert_eq!(first.await.unwrap(), Ok(false));
}

#[tokio::test]
async fn test_dropped_request_releases_its_entry() {
    let system = DispatchSystem::new(fast_config().with_confirmation_timeout(Duration::from_secs(10)));
    let order = seed(&system, &[]).await;

    let engine = system.confirmation.clone();
    let request = tokio::spawn(async move { engine.request_order_confirmation(&order).await });
    wait_until(|| system.confirmation.waits().contains(ORDER)).await;

    request.abort();
    let _ = request.await;

    assert!(!system.confirmation.waits().contains(ORDER));
}
