//! CrudContext - one state machine per resource type
//!
//! The context owns the create and update dialogs, the update target, and
//! the reload signal; the injected service does the actual work. Dialog
//! submits are serialized per instance (the form engine blocks a second
//! submit while one is in flight), and the reload version only moves on
//! success — a failed call leaves the dialog open with the error surfaced,
//! so the user does not lose entered data.

use std::sync::Arc;

use backoffice_common::{EnglishFallback, Translate};
use backoffice_fields::FormValues;
use backoffice_forms::{FormDialog, FormMode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::batch::BatchOutcome;
use crate::error::{CrudError, Result};
use crate::reload::ReloadSignal;
use crate::service::{Resource, ResourceService};

/// Projects an update target into the dialog's initial values
pub type TargetValues<T> = Box<dyn Fn(&T) -> FormValues + Send + Sync>;

/// Create/update/delete state for one resource type
pub struct CrudContext<T: Resource, S: ResourceService> {
    service: S,
    create_dialog: FormDialog,
    update_dialog: FormDialog,
    target: Option<T>,
    target_values: TargetValues<T>,
    reload: ReloadSignal,
    translate: Arc<dyn Translate>,
}

impl<T: Resource, S: ResourceService> CrudContext<T, S> {
    /// Wire a resource's dialogs and service together.
    ///
    /// `target_values` maps an update target to the field values the edit
    /// dialog opens with.
    pub fn new(
        service: S,
        create_dialog: FormDialog,
        update_dialog: FormDialog,
        target_values: impl Fn(&T) -> FormValues + Send + Sync + 'static,
    ) -> Self {
        Self {
            service,
            create_dialog,
            update_dialog,
            target: None,
            target_values: Box::new(target_values),
            reload: ReloadSignal::new(),
            translate: Arc::new(EnglishFallback),
        }
    }

    /// Share an existing reload signal instead of a fresh one
    pub fn with_reload(mut self, reload: ReloadSignal) -> Self {
        self.reload = reload;
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

    /// The version counter list effects subscribe to
    pub fn reload(&self) -> &ReloadSignal {
        &self.reload
    }

    pub fn create_dialog(&self) -> &FormDialog {
        &self.create_dialog
    }

    pub fn create_dialog_mut(&mut self) -> &mut FormDialog {
        &mut self.create_dialog
    }

    pub fn update_dialog(&self) -> &FormDialog {
        &self.update_dialog
    }

    pub fn update_dialog_mut(&mut self) -> &mut FormDialog {
        &mut self.update_dialog
    }

    /// The resource the update dialog is editing
    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Confirm text for a single delete
    pub fn delete_confirmation(&self) -> String {
        self.translate.t("confirm.delete", &[])
    }

    /// Confirm text for a batch delete of `count` rows
    pub fn batch_delete_confirmation(&self, count: usize) -> String {
        self.translate
            .t("confirm.batch_delete", &[("count", &count.to_string())])
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Open the create dialog with default-seeded values
    pub fn open_create(&mut self) -> Result<()> {
        self.create_dialog.open(FormMode::Create, None)?;
        Ok(())
    }

    /// Close the create dialog, discarding edits
    pub fn close_create(&mut self) {
        self.create_dialog.close();
    }

    /// Validate, call the create service, close, and bump the reload version.
    ///
    /// Validation failure leaves the dialog editing with field errors; a
    /// service failure reopens it with the error banner. Neither bumps.
    pub async fn submit_create(&mut self, intent: &str) -> Result<Value> {
        let ticket = self.create_dialog.begin_submit(intent)?;
        let payload = ticket.payload_json();
        debug!(intent = %ticket.intent(), "create submit");

        match self.service.create(payload).await {
            Ok(created) => {
                self.create_dialog.finish_submit(ticket, Ok(()));
                self.reload.bump();
                Ok(created)
            }
            Err(err) => {
                self.create_dialog.finish_submit(ticket, Err(err.clone()));
                Err(CrudError::Service(err))
            }
        }
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Open the update dialog for `target`, seeding its projected values
    pub fn open_update(&mut self, target: T) -> Result<()> {
        let initial = (self.target_values)(&target);
        self.update_dialog.open(FormMode::Edit, Some(&initial))?;
        self.target = Some(target);
        Ok(())
    }

    /// Close the update dialog, discarding edits and the target
    pub fn close_update(&mut self) {
        self.update_dialog.close();
        self.target = None;
    }

    /// Validate, call the update service for the target, close, and bump
    pub async fn submit_update(&mut self, intent: &str) -> Result<Value> {
        let id = self
            .target
            .as_ref()
            .map(Resource::id)
            .ok_or(CrudError::MissingTarget)?;
        let ticket = self.update_dialog.begin_submit(intent)?;
        let payload = ticket.payload_json();
        debug!(%id, intent = %ticket.intent(), "update submit");

        match self.service.update(&id, payload).await {
            Ok(updated) => {
                self.update_dialog.finish_submit(ticket, Ok(()));
                self.target = None;
                self.reload.bump();
                Ok(updated)
            }
            Err(err) => {
                self.update_dialog.finish_submit(ticket, Err(err.clone()));
                Err(CrudError::Service(err))
            }
        }
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Delete one resource; success bumps the reload version once
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.service.delete(id).await.map_err(CrudError::Service)?;
        self.reload.bump();
        Ok(())
    }

    /// Delete every id, continuing past failures.
    ///
    /// The aggregate outcome reports failures once; the reload version is
    /// bumped exactly once when at least one id succeeded (the completed
    /// subset is gone from the server), and not at all when every id failed.
    pub async fn batch_delete(&mut self, ids: &[String]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for id in ids {
            match self.service.delete(id).await {
                Ok(()) => outcome.succeeded.push(id.clone()),
                Err(err) => {
                    debug!(%id, error = %err, "batch delete item failed");
                    outcome.failed.push((id.clone(), err));
                }
            }
        }
        if outcome.has_failures() {
            warn!(
                attempted = outcome.attempted(),
                failed = outcome.failed.len(),
                "batch delete completed with failures"
            );
        }
        if !outcome.succeeded.is_empty() {
            self.reload.bump();
        }
        outcome
    }
}
