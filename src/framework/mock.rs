//! # Mock Helpers
//!
//! Lets a test play the part of a [`RecordActor`](crate::framework::RecordActor):
//! build a client whose requests land on a receiver the test controls, then pull
//! each request off, assert on it, and answer it (success, error, or not at all).
//!
//! | | Mock receiver | Real actor |
//! |---|---|---|
//! | **State** | Scripted per request | Real map |
//! | **Error injection** | Answer with any `RecordError` | Hard |
//! | **Use case** | Client wrappers, error mapping | Engines, end-to-end flows |
//!
//! ```rust
//! use food_dispatch::framework::mock::{create_mock_client, expect_get};
//! use food_dispatch::model::{Order, OrderId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut receiver) = create_mock_client::<Order>(10);
//!     let task = tokio::spawn(async move { client.get(OrderId(1)).await });
//!
//!     let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
//!     assert_eq!(id, OrderId(1));
//!     responder.send(Ok(None)).unwrap();
//!
//!     assert!(task.await.unwrap().unwrap().is_none());
//! }
//! ```

use crate::framework::client::RecordClient;
use crate::framework::message::{Filter, RecordRequest, Response};
use crate::framework::record::Record;
use tokio::sync::mpsc;

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: Record>(
    buffer_size: usize,
) -> (RecordClient<T>, mpsc::Receiver<RecordRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RecordClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Record>(
    receiver: &mut mpsc::Receiver<RecordRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(RecordRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Patch request
pub async fn expect_patch<T: Record>(
    receiver: &mut mpsc::Receiver<RecordRequest<T>>,
) -> Option<(T::Id, T::Patch, Response<T>)> {
    match receiver.recv().await {
        Some(RecordRequest::Patch {
            id,
            patch,
            respond_to,
        }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Scan request.
///
/// The filter is handed back so the test can run it over its own fixtures.
pub async fn expect_scan<T: Record>(
    receiver: &mut mpsc::Receiver<RecordRequest<T>>,
) -> Option<(Filter<T>, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(RecordRequest::Scan { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}
