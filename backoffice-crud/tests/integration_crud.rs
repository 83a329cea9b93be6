//! Integration tests for the CRUD context: dialog wiring, reload
//! signaling, and batch semantics against a scripted service.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use backoffice_crud::{
    BatchOutcome, CrudContext, CrudError, ReloadSignal, Resource, ResourceService, ServiceError,
};
use backoffice_fields::{FieldList, FieldSpec, FieldValue, FormValues, Schema, ValueRule};
use backoffice_forms::{FormDialog, FormPhase, Intent};
use serde_json::Value;

#[derive(Debug, Clone)]
struct Topic {
    id: String,
    title: String,
    status: String,
}

impl Resource for Topic {
    fn id(&self) -> String {
        self.id.clone()
    }
}

#[derive(Default)]
struct FakeService {
    calls: Arc<Mutex<Vec<String>>>,
    fail_create: bool,
    fail_delete: HashSet<String>,
}

impl FakeService {
    fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    fn failing_deletes(ids: &[&str]) -> Self {
        Self {
            fail_delete: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Handle on the call log, kept by tests before the service moves into
    /// the context
    fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ResourceService for FakeService {
    async fn create(&self, payload: Value) -> Result<Value, ServiceError> {
        self.record(format!("create {}", payload["title"]));
        if self.fail_create {
            return Err(ServiceError::new("503 unavailable"));
        }
        Ok(serde_json::json!({ "id": "created-1", "title": payload["title"] }))
    }

    async fn update(&self, id: &str, payload: Value) -> Result<Value, ServiceError> {
        self.record(format!("update {id}"));
        Ok(serde_json::json!({ "id": id, "title": payload["title"] }))
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.record(format!("delete {id}"));
        if self.fail_delete.contains(id) {
            return Err(ServiceError::new(format!("cannot delete {id}")));
        }
        Ok(())
    }
}

fn topic_fields() -> FieldList {
    FieldList::new(vec![
        FieldSpec::text("title", "Title"),
        FieldSpec::text("status", "Status").with_default(FieldValue::text("draft")),
    ])
    .unwrap()
}

fn topic_schema() -> Arc<Schema> {
    Arc::new(
        Schema::new()
            .rule("title", ValueRule::text().labeled("Title"))
            .rule("status", ValueRule::text()),
    )
}

fn dialog() -> FormDialog {
    FormDialog::new(topic_fields(), topic_schema()).unwrap()
}

fn topic_values(topic: &Topic) -> FormValues {
    let mut values = FormValues::new();
    values.insert("title", FieldValue::text(&topic.title));
    values.insert("status", FieldValue::text(&topic.status));
    values
}

fn context(service: FakeService) -> CrudContext<Topic, FakeService> {
    CrudContext::new(service, dialog(), dialog(), topic_values)
}

fn topic(id: &str, title: &str) -> Topic {
    Topic {
        id: id.into(),
        title: title.into(),
        status: "published".into(),
    }
}

#[tokio::test]
async fn open_then_close_without_submit_leaves_version_unchanged() {
    let mut ctx = context(FakeService::default());
    ctx.open_create().unwrap();
    ctx.close_create();
    assert_eq!(ctx.reload().version(), 0);
    assert_eq!(ctx.create_dialog().phase(), FormPhase::Closed);
}

#[tokio::test]
async fn successful_create_closes_dialog_and_bumps_once() {
    let mut ctx = context(FakeService::default());
    ctx.open_create().unwrap();
    ctx.create_dialog_mut()
        .set_value("title", FieldValue::text("New topic"))
        .unwrap();

    let created = ctx.submit_create(Intent::DEFAULT).await.unwrap();
    assert_eq!(created["id"], "created-1");
    assert!(!ctx.create_dialog().is_open());
    assert_eq!(ctx.reload().version(), 1);
}

#[tokio::test]
async fn validation_failure_never_reaches_the_service() {
    let service = FakeService::default();
    let calls = service.call_log();
    let mut ctx = context(service);
    ctx.open_create().unwrap();

    let err = ctx.submit_create(Intent::DEFAULT).await.unwrap_err();
    assert!(err.is_validation());
    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(ctx.reload().version(), 0);
    assert!(ctx.create_dialog().is_open());
    assert!(ctx.create_dialog().field_error("title").is_some());
}

#[tokio::test]
async fn service_failure_keeps_dialog_open_with_error_and_no_bump() {
    let mut ctx = context(FakeService::failing_create());
    ctx.open_create().unwrap();
    ctx.create_dialog_mut()
        .set_value("title", FieldValue::text("Doomed"))
        .unwrap();

    let err = ctx.submit_create(Intent::DEFAULT).await.unwrap_err();
    assert!(matches!(err, CrudError::Service(_)));
    assert!(ctx.create_dialog().is_open());
    assert_eq!(ctx.create_dialog().banner_error(), Some("503 unavailable"));
    // Entered values survive the failure.
    assert_eq!(ctx.create_dialog().values().text("title"), Some("Doomed"));
    assert_eq!(ctx.reload().version(), 0);
}

#[tokio::test]
async fn update_dialog_round_trips_target_values() {
    let mut ctx = context(FakeService::default());
    ctx.open_update(topic("t-9", "Original title")).unwrap();

    let values = ctx.update_dialog().values();
    assert_eq!(values.text("title"), Some("Original title"));
    assert_eq!(values.text("status"), Some("published"));
    assert_eq!(ctx.target().unwrap().id(), "t-9");
}

#[tokio::test]
async fn submit_update_uses_target_id_and_bumps() {
    let service = FakeService::default();
    let calls = service.call_log();
    let mut ctx = context(service);
    ctx.open_update(topic("t-9", "Original")).unwrap();
    ctx.update_dialog_mut()
        .set_value("title", FieldValue::text("Renamed"))
        .unwrap();

    let updated = ctx.submit_update(Intent::DEFAULT).await.unwrap();
    assert_eq!(updated["id"], "t-9");
    assert_eq!(calls.lock().unwrap().as_slice(), ["update t-9"]);
    assert!(!ctx.update_dialog().is_open());
    assert!(ctx.target().is_none());
    assert_eq!(ctx.reload().version(), 1);
}

#[tokio::test]
async fn submit_update_without_target_is_rejected() {
    let mut ctx = context(FakeService::default());
    let err = ctx.submit_update(Intent::DEFAULT).await.unwrap_err();
    assert!(matches!(err, CrudError::MissingTarget));
}

#[tokio::test]
async fn close_update_discards_target_and_edits() {
    let mut ctx = context(FakeService::default());
    ctx.open_update(topic("t-1", "One")).unwrap();
    ctx.close_update();
    assert!(ctx.target().is_none());

    // A different target opens with its own values, nothing leaked.
    ctx.open_update(topic("t-2", "Two")).unwrap();
    assert_eq!(ctx.update_dialog().values().text("title"), Some("Two"));
}

#[tokio::test]
async fn single_delete_bumps_once() {
    let mut ctx = context(FakeService::default());
    ctx.delete("t-1").await.unwrap();
    assert_eq!(ctx.reload().version(), 1);
}

#[tokio::test]
async fn failed_delete_does_not_bump() {
    let mut ctx = context(FakeService::failing_deletes(&["t-1"]));
    assert!(ctx.delete("t-1").await.is_err());
    assert_eq!(ctx.reload().version(), 0);
}

#[tokio::test]
async fn batch_delete_attempts_every_id_past_failures() {
    let service = FakeService::failing_deletes(&["y"]);
    let calls = service.call_log();
    let mut ctx = context(service);

    let ids = vec!["x".to_string(), "y".to_string(), "z".to_string()];
    let outcome: BatchOutcome = ctx.batch_delete(&ids).await;

    assert_eq!(
        calls.lock().unwrap().as_slice(),
        ["delete x", "delete y", "delete z"]
    );
    assert!(outcome.has_failures());
    assert_eq!(outcome.succeeded, vec!["x".to_string(), "z".to_string()]);
    assert_eq!(outcome.failed.len(), 1);
    assert!(outcome.first_error().unwrap().contains("y"));
    // One bump for the completed subset, not one per id.
    assert_eq!(ctx.reload().version(), 1);
}

#[tokio::test]
async fn batch_delete_with_no_successes_does_not_bump() {
    let mut ctx = context(FakeService::failing_deletes(&["x", "y"]));
    let ids = vec!["x".to_string(), "y".to_string()];
    let outcome = ctx.batch_delete(&ids).await;

    assert!(outcome.all_failed());
    assert_eq!(ctx.reload().version(), 0);
}

#[tokio::test]
async fn both_intents_share_validation() {
    let create = FormDialog::new(topic_fields(), topic_schema())
        .unwrap()
        .with_intents(vec![Intent::from("temporary"), Intent::from("created")]);
    let mut ctx = CrudContext::new(FakeService::default(), create, dialog(), topic_values);
    ctx.open_create().unwrap();

    for intent in ["temporary", "created"] {
        let err = ctx.submit_create(intent).await.unwrap_err();
        assert!(err.is_validation(), "intent {intent} must be blocked");
    }
    assert_eq!(ctx.reload().version(), 0);
}

#[tokio::test]
async fn shared_reload_signal_observes_all_mutations() {
    let shared = ReloadSignal::new();
    let mut ctx = context(FakeService::default()).with_reload(shared.clone());

    ctx.delete("t-1").await.unwrap();
    ctx.delete("t-2").await.unwrap();
    assert_eq!(shared.version(), 2);
}

#[tokio::test]
async fn confirm_messages_come_from_the_catalog() {
    let ctx = context(FakeService::default());
    assert_eq!(ctx.delete_confirmation(), "Delete this item?");
    assert_eq!(
        ctx.batch_delete_confirmation(3),
        "Delete 3 selected items?"
    );
}
