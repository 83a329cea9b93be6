//! FormDialog state machine
//!
//! One instance per resource-and-mode. The lifecycle is
//! `Closed → Editing → Submitting → (Closed | Editing)`: opening seeds
//! values, edits stay in `Editing`, `begin_submit` validates and yields the
//! payload, `finish_submit` applies the service outcome. Closing discards
//! everything; an outcome arriving after close is dropped.

use std::sync::Arc;

use backoffice_common::{EnglishFallback, ServiceError, Translate};
use backoffice_fields::{
    AttachmentItem, FieldKind, FieldList, FieldValue, FormValues, SchemaValidate, Validation,
};
use indexmap::IndexMap;
use tracing::debug;

use crate::error::{FormError, Result};
use crate::intent::Intent;
use crate::upload::{FileUpload, UploadService};

/// Whether the dialog creates a new resource or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Where the dialog is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Closed,
    Editing,
    Submitting,
}

/// Proof of a validated submit in flight.
///
/// Produced by `begin_submit`, consumed by `finish_submit`. Carries the
/// coerced payload and the intent tag; the generation binds it to the open
/// instance that produced it.
#[derive(Debug)]
pub struct SubmitTicket {
    generation: u64,
    intent: Intent,
    payload: FormValues,
}

impl SubmitTicket {
    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    pub fn payload(&self) -> &FormValues {
        &self.payload
    }

    /// The JSON object handed to the service
    pub fn payload_json(&self) -> serde_json::Value {
        self.payload.to_payload()
    }
}

/// What `finish_submit` did with the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDisposition {
    /// Success: the dialog closed and its state was discarded
    Completed,
    /// Failure: the dialog reopened for editing with the error surfaced
    Reopened,
    /// The dialog was closed or reopened in the meantime; outcome dropped
    Discarded,
}

/// A schema-driven create/edit form dialog
pub struct FormDialog {
    fields: FieldList,
    schema: Arc<dyn SchemaValidate>,
    intents: Vec<Intent>,
    uploader: Option<Arc<dyn UploadService>>,
    translate: Arc<dyn Translate>,

    mode: FormMode,
    phase: FormPhase,
    values: FormValues,
    field_errors: IndexMap<String, String>,
    banner_error: Option<String>,
    /// Bumped on every open; stale tickets are recognized by mismatch
    generation: u64,
}

impl FormDialog {
    /// Build a dialog from a field list and a validation schema.
    ///
    /// Fails fast when the field list does not fit the schema's key space
    /// (see `FieldList::check_against`).
    pub fn new(fields: FieldList, schema: Arc<dyn SchemaValidate>) -> Result<Self> {
        fields.check_against(schema.as_ref())?;
        Ok(Self {
            fields,
            schema,
            intents: vec![Intent::new(Intent::DEFAULT)],
            uploader: None,
            translate: Arc::new(EnglishFallback),
            mode: FormMode::Create,
            phase: FormPhase::Closed,
            values: FormValues::new(),
            field_errors: IndexMap::new(),
            banner_error: None,
            generation: 0,
        })
    }

    /// Declare the submit intents this dialog accepts.
    ///
    /// Replaces the default `"submit"` intent; an empty set makes the
    /// dialog un-submittable.
    pub fn with_intents(mut self, intents: Vec<Intent>) -> Self {
        self.intents = intents;
        self
    }

    /// Attach the upload service used by attachment fields
    pub fn with_uploader(mut self, uploader: Arc<dyn UploadService>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// Replace the built-in English message catalog
    pub fn with_translate(mut self, translate: Arc<dyn Translate>) -> Self {
        self.translate = translate;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.phase != FormPhase::Closed
    }

    /// While true, all submit controls must be disabled
    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.field_errors.get(key).map(String::as_str)
    }

    pub fn field_errors(&self) -> &IndexMap<String, String> {
        &self.field_errors
    }

    /// The dialog-level message from a failed service call
    pub fn banner_error(&self) -> Option<&str> {
        self.banner_error.as_deref()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open the dialog, seeding values from `initial` merged with defaults.
    ///
    /// Edit dialogs pass the target's projected values; create dialogs pass
    /// `None`. Attachment fields require an uploader to have been supplied.
    pub fn open(&mut self, mode: FormMode, initial: Option<&FormValues>) -> Result<()> {
        if self.phase != FormPhase::Closed {
            return Err(FormError::AlreadyOpen);
        }
        if self.uploader.is_none() {
            if let Some(spec) = self
                .fields
                .iter()
                .find(|s| matches!(s.kind, FieldKind::Attachments))
            {
                return Err(FormError::UploaderRequired {
                    key: spec.key.clone(),
                });
            }
        }

        self.generation += 1;
        self.mode = mode;
        self.phase = FormPhase::Editing;
        self.values = self.fields.initial_values(initial);
        self.field_errors.clear();
        self.banner_error = None;
        debug!(mode = ?mode, generation = self.generation, "dialog opened");
        Ok(())
    }

    /// Discard all in-progress edits and close.
    ///
    /// Nothing leaks into a subsequently opened instance; an in-flight
    /// submit outcome arriving after this is discarded.
    pub fn close(&mut self) {
        self.phase = FormPhase::Closed;
        self.values = FormValues::new();
        self.field_errors.clear();
        self.banner_error = None;
        debug!(generation = self.generation, "dialog closed");
    }

    /// Set one field's value.
    ///
    /// Allowed only while editable; clears the field's error and any banner.
    pub fn set_value(&mut self, key: &str, value: FieldValue) -> Result<()> {
        match self.phase {
            FormPhase::Closed => return Err(FormError::NotOpen),
            FormPhase::Submitting => return Err(FormError::NotEditing),
            FormPhase::Editing => {}
        }
        if !self.fields.contains(key) {
            return Err(FormError::unknown_field(key));
        }
        self.values.insert(key, value);
        self.field_errors.shift_remove(key);
        self.banner_error = None;
        Ok(())
    }

    // =========================================================================
    // Submit
    // =========================================================================

    /// Validate and start a submit for `intent`.
    ///
    /// On validation failure the dialog stays in `Editing` with field errors
    /// attached and no payload escapes. On success the dialog enters
    /// `Submitting` — a second call errs until `finish_submit` runs.
    pub fn begin_submit(&mut self, intent: &str) -> Result<SubmitTicket> {
        match self.phase {
            FormPhase::Closed => return Err(FormError::NotOpen),
            FormPhase::Submitting => return Err(FormError::SubmitInFlight),
            FormPhase::Editing => {}
        }
        let intent = self
            .intents
            .iter()
            .find(|i| i.as_str() == intent)
            .cloned()
            .ok_or_else(|| FormError::UnknownIntent {
                intent: intent.to_string(),
            })?;

        match self.schema.validate(&self.values, self.translate.as_ref()) {
            Validation::Invalid(errors) => {
                let fields = errors.len();
                self.field_errors = errors;
                debug!(%intent, fields, "submit blocked by validation");
                Err(FormError::ValidationFailed { fields })
            }
            Validation::Valid(payload) => {
                self.phase = FormPhase::Submitting;
                self.field_errors.clear();
                self.banner_error = None;
                debug!(%intent, "submit started");
                Ok(SubmitTicket {
                    generation: self.generation,
                    intent,
                    payload,
                })
            }
        }
    }

    /// Apply the service outcome for an in-flight submit.
    ///
    /// Success closes the dialog; failure reopens it for editing with the
    /// error surfaced and all entered values intact. A ticket from an
    /// instance that has since closed or reopened is discarded.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        outcome: std::result::Result<(), ServiceError>,
    ) -> SubmitDisposition {
        if ticket.generation != self.generation || self.phase != FormPhase::Submitting {
            debug!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                "stale submit outcome discarded"
            );
            return SubmitDisposition::Discarded;
        }
        match outcome {
            Ok(()) => {
                self.close();
                SubmitDisposition::Completed
            }
            Err(err) => {
                self.phase = FormPhase::Editing;
                self.banner_error = Some(err.message);
                SubmitDisposition::Reopened
            }
        }
    }

    // =========================================================================
    // Attachments
    // =========================================================================

    /// Upload a file into an attachments field.
    ///
    /// The raw file goes to the upload service; only the returned reference
    /// enters the field's value. An upload failure is recorded as a field
    /// error (the dialog stays open) — `Err` here means the call itself was
    /// misused, not that the upload failed.
    pub async fn attach_file(&mut self, key: &str, file: FileUpload) -> Result<()> {
        if self.phase != FormPhase::Editing {
            return Err(if self.phase == FormPhase::Closed {
                FormError::NotOpen
            } else {
                FormError::NotEditing
            });
        }
        let spec = self
            .fields
            .get(key)
            .ok_or_else(|| FormError::unknown_field(key))?;
        if !matches!(spec.kind, FieldKind::Attachments) {
            return Err(FormError::NotAttachmentField { key: key.into() });
        }
        let uploader = self
            .uploader
            .clone()
            .ok_or_else(|| FormError::UploaderRequired { key: key.into() })?;

        match uploader.upload(file).await {
            Ok(file_ref) => {
                let mut items = self
                    .values
                    .attachments(key)
                    .map(<[AttachmentItem]>::to_vec)
                    .unwrap_or_default();
                let mut item = AttachmentItem::new(file_ref.id);
                item.order = items.len() as u32;
                item.is_main = items.is_empty();
                items.push(item);
                self.values.insert(key, FieldValue::Attachments(items));
                self.field_errors.shift_remove(key);
                Ok(())
            }
            Err(err) => {
                debug!(key, error = %err, "attachment upload failed");
                self.field_errors.insert(
                    key.to_string(),
                    self.translate
                        .t("upload.failed", &[("reason", &err.message)]),
                );
                Ok(())
            }
        }
    }

    /// Remove an attachment and renumber the rest
    pub fn remove_attachment(&mut self, key: &str, file_id: &str) -> Result<()> {
        let mut items = self.attachment_items(key)?;
        let removed_main = items
            .iter()
            .any(|i| i.file_id == file_id && i.is_main);
        items.retain(|i| i.file_id != file_id);
        for (order, item) in items.iter_mut().enumerate() {
            item.order = order as u32;
        }
        if removed_main {
            if let Some(first) = items.first_mut() {
                first.is_main = true;
            }
        }
        self.values.insert(key, FieldValue::Attachments(items));
        Ok(())
    }

    /// Mark one attachment as the main one
    pub fn set_main_attachment(&mut self, key: &str, file_id: &str) -> Result<()> {
        let mut items = self.attachment_items(key)?;
        for item in &mut items {
            item.is_main = item.file_id == file_id;
        }
        self.values.insert(key, FieldValue::Attachments(items));
        Ok(())
    }

    fn attachment_items(&self, key: &str) -> Result<Vec<AttachmentItem>> {
        if self.phase != FormPhase::Editing {
            return Err(if self.phase == FormPhase::Closed {
                FormError::NotOpen
            } else {
                FormError::NotEditing
            });
        }
        let spec = self
            .fields
            .get(key)
            .ok_or_else(|| FormError::unknown_field(key))?;
        if !matches!(spec.kind, FieldKind::Attachments) {
            return Err(FormError::NotAttachmentField { key: key.into() });
        }
        Ok(self
            .values
            .attachments(key)
            .map(<[AttachmentItem]>::to_vec)
            .unwrap_or_default())
    }
}
