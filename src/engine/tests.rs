//! Tests for the execution engine

use super::*;
use crate::http::RequestDescriptor;
use crate::operation::{Operation, Resource};
use crate::types::Method;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Transport that replays scripted replies and records what it was sent
#[derive(Default)]
struct FakeTransport {
    replies: Mutex<VecDeque<Result<JsonValue>>>,
    sent: Mutex<Vec<RequestDescriptor>>,
}

impl FakeTransport {
    fn replying(replies: Vec<Result<JsonValue>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            sent: Mutex::default(),
        }
    }

    fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<JsonValue> {
        self.sent.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({})))
    }
}

fn selector(resource: Resource, operation: Operation) -> OperationSelector {
    OperationSelector::new(resource, operation)
}

fn numbered(n: usize) -> JsonValue {
    json!({ "items": (0..n).map(|i| json!({ "id": i })).collect::<Vec<_>>() })
}

// ============================================================================
// reshape
// ============================================================================

#[test]
fn test_reshape_truncates_keeping_first() {
    let values = reshape(numbered(10), true, Some(3));
    assert_eq!(values, vec![json!({"id": 0}), json!({"id": 1}), json!({"id": 2})]);
}

#[test]
fn test_reshape_shorter_than_limit() {
    let values = reshape(numbered(2), true, Some(50));
    assert_eq!(values.len(), 2);
}

#[test]
fn test_reshape_without_limit_keeps_everything() {
    let values = reshape(numbered(120), true, None);
    assert_eq!(values.len(), 120);
}

#[test]
fn test_reshape_missing_items_emits_whole_body() {
    let body = json!({"chats": [1, 2, 3], "hasMore": false});
    let values = reshape(body.clone(), true, Some(1));
    assert_eq!(values, vec![body]);
}

#[test]
fn test_reshape_items_not_array_emits_whole_body() {
    let body = json!({"items": "nope"});
    let values = reshape(body.clone(), true, Some(1));
    assert_eq!(values, vec![body]);
}

#[test]
fn test_reshape_non_list_ignores_items() {
    let body = numbered(5);
    let values = reshape(body.clone(), false, Some(1));
    assert_eq!(values, vec![body]);
}

#[test]
fn test_reshape_top_level_array() {
    let values = reshape(json!([{"a": 1}, {"a": 2}]), false, None);
    assert_eq!(values, vec![json!({"a": 1}), json!({"a": 2})]);
}

#[test]
fn test_output_record_wraps_scalars() {
    let record = OutputRecord::new(json!("ok"), 4);
    assert_eq!(JsonValue::Object(record.json.clone()), json!({"value": "ok"}));
    assert_eq!(record.item(), 4);
    assert!(record.error_message().is_none());

    let error = OutputRecord::error(1, "boom");
    assert_eq!(error.error_message(), Some("boom"));
}

#[test]
fn test_output_record_serialization() {
    let record = OutputRecord::new(json!({"id": "c1"}), 2);
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"json": {"id": "c1"}, "pairedItem": {"item": 2}})
    );
}

// ============================================================================
// Dispatcher
// ============================================================================

#[tokio::test]
async fn test_list_emits_limited_records() {
    let transport = FakeTransport::replying(vec![Ok(numbered(8))]);
    let dispatcher = Dispatcher::new(transport);

    let records = dispatcher
        .execute(
            selector(Resource::Chat, Operation::List),
            &[json!({"options": {"limit": 5}})],
        )
        .await
        .unwrap();

    assert_eq!(records.len(), 5);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.json["id"], json!(i));
        assert_eq!(record.item(), 0);
    }
}

#[tokio::test]
async fn test_message_list_sends_encoded_path() {
    let transport = FakeTransport::replying(vec![Ok(numbered(3))]);
    let dispatcher = Dispatcher::new(transport);

    let records = dispatcher
        .execute(
            selector(Resource::Message, Operation::List),
            &[json!({"chatId": "room/1"})],
        )
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    let sent = dispatcher.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::GET);
    assert_eq!(sent[0].path, "/v1/chats/room%2F1/messages");
}

#[tokio::test]
async fn test_non_list_emits_single_record() {
    let body = json!({"id": "m1", "items": [1, 2, 3]});
    let transport = FakeTransport::replying(vec![Ok(body.clone())]);
    let dispatcher = Dispatcher::new(transport);

    let records = dispatcher
        .execute(
            selector(Resource::Message, Operation::Send),
            &[json!({"chatId": "c1", "messageText": "hi"})],
        )
        .await
        .unwrap();

    assert_eq!(records, vec![OutputRecord::new(body, 0)]);
    assert_eq!(
        dispatcher.transport().sent()[0].body,
        Some(json!({"text": "hi"}))
    );
}

#[tokio::test]
async fn test_one_request_per_item() {
    let transport = FakeTransport::replying(vec![
        Ok(json!({"id": "a"})),
        Ok(json!({"id": "b"})),
        Ok(json!({"id": "c"})),
    ]);
    let dispatcher = Dispatcher::new(transport);

    let items = [
        json!({"chatId": "a"}),
        json!({"chatId": "b"}),
        json!({"chatId": "c"}),
    ];
    let records = dispatcher
        .execute(selector(Resource::Chat, Operation::Get), &items)
        .await
        .unwrap();

    let paths: Vec<String> = dispatcher
        .transport()
        .sent()
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, vec!["/v1/chats/a", "/v1/chats/b", "/v1/chats/c"]);

    let items_of: Vec<usize> = records.iter().map(OutputRecord::item).collect();
    assert_eq!(items_of, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_continue_on_fail_records_error() {
    let transport = FakeTransport::replying(vec![
        Ok(json!({"id": "first"})),
        Err(Error::http_status(500, "upstream exploded")),
        Ok(json!({"id": "third"})),
    ]);
    let dispatcher =
        Dispatcher::new(transport).with_config(ExecutionConfig::continue_on_fail());

    let items = [json!({"chatId": "1"}), json!({"chatId": "2"}), json!({"chatId": "3"})];
    let records = dispatcher
        .execute(selector(Resource::Chat, Operation::Get), &items)
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0], OutputRecord::new(json!({"id": "first"}), 0));
    assert_eq!(
        records[1],
        OutputRecord::error(1, "HTTP 500: upstream exploded")
    );
    assert_eq!(records[2], OutputRecord::new(json!({"id": "third"}), 2));
}

#[tokio::test]
async fn test_continue_on_fail_records_parameter_error() {
    let transport = FakeTransport::replying(vec![Ok(json!({"id": "ok"}))]);
    let dispatcher =
        Dispatcher::new(transport).with_config(ExecutionConfig::continue_on_fail());

    let items = [json!({}), json!({"chatId": "c"})];
    let records = dispatcher
        .execute(selector(Resource::Chat, Operation::Get), &items)
        .await
        .unwrap();

    assert_eq!(
        records[0].error_message(),
        Some("Missing required parameter: chatId")
    );
    assert_eq!(records[1].json["id"], "ok");
    assert_eq!(dispatcher.transport().sent().len(), 1);
}

#[tokio::test]
async fn test_failure_aborts_batch_with_index() {
    let transport = FakeTransport::replying(vec![
        Ok(json!({"id": "0"})),
        Ok(json!({"id": "1"})),
        Err(Error::http_status(404, "chat not found")),
        Ok(json!({"id": "3"})),
    ]);
    let dispatcher = Dispatcher::new(transport);

    let items: Vec<JsonValue> = (0..4).map(|i| json!({"chatId": i.to_string()})).collect();
    let err = dispatcher
        .execute(selector(Resource::Chat, Operation::Get), &items)
        .await
        .unwrap_err();

    assert_eq!(err.item_index(), Some(2));
    assert_eq!(err.to_string(), "Item 2 failed: HTTP 404: chat not found");
    // Nothing is sent for items after the failing one
    assert_eq!(dispatcher.transport().sent().len(), 3);
}

#[tokio::test]
async fn test_invalid_limit_fails_before_sending() {
    let dispatcher = Dispatcher::new(FakeTransport::default());

    let err = dispatcher
        .execute(
            selector(Resource::Chat, Operation::List),
            &[json!({"options": {"limit": 500}})],
        )
        .await
        .unwrap_err();

    assert!(err.is_input_error());
    assert!(dispatcher.transport().sent().is_empty());
}

#[tokio::test]
async fn test_unsupported_selector_fails_fast() {
    let dispatcher = Dispatcher::new(FakeTransport::default())
        .with_config(ExecutionConfig::continue_on_fail());

    let err = dispatcher
        .execute(selector(Resource::Account, Operation::Send), &[json!({})])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedOperation { .. }));
    assert!(dispatcher.transport().sent().is_empty());
}

#[tokio::test]
async fn test_empty_batch() {
    let dispatcher = Dispatcher::new(FakeTransport::default());
    let records = dispatcher
        .execute(selector(Resource::Account, Operation::List), &[])
        .await
        .unwrap();
    assert!(records.is_empty());
}
