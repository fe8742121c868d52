//! The form handle and its event lifecycle.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::format::format_value;
use crate::options::FormOptions;
use crate::schema::FormSchema;
use crate::store::{Action, FieldStatus, FormErrors, FormState};
use crate::validation::{validate_field, BoxFuture};
use crate::value::{FieldValue, FormValues};
use crate::view::FormView;
use crate::visibility::is_visible;

/// Error returned by a submit callback.
pub type SubmitError = Box<dyn std::error::Error + Send + Sync>;

/// A boxed async submit callback receiving a snapshot of the values.
pub type SubmitHandler = Arc<
    dyn Fn(FormValues) -> BoxFuture<'static, std::result::Result<(), SubmitError>>
        + Send
        + Sync,
>;

/// Adapts an async closure into a [`SubmitHandler`].
pub fn submit_handler<F, Fut>(handler: F) -> SubmitHandler
where
    F: Fn(FormValues) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<(), SubmitError>> + Send + 'static,
{
    Arc::new(move |values| Box::pin(handler(values)))
}

/// Adapts a synchronous closure into a [`SubmitHandler`].
pub fn sync_submit_handler<F>(handler: F) -> SubmitHandler
where
    F: Fn(FormValues) -> std::result::Result<(), SubmitError> + Send + Sync + 'static,
{
    Arc::new(move |values| Box::pin(future::ready(handler(values))))
}

/// Result of a submit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The callback completed successfully.
    Submitted,
    /// The callback failed; the message is stored as the submission error.
    Failed(String),
    /// A submission was already in flight; nothing happened.
    AlreadySubmitting,
    /// The form is unmounted; nothing was recorded.
    Unmounted,
}

/// Bookkeeping for the most recent validation dispatched on a field.
#[derive(Debug, Default)]
struct ValidationSlot {
    /// Sequence number of the latest dispatch.
    seq: u64,
    /// Latest resolved message, kept even when display is deferred.
    latent: String,
}

#[derive(Debug)]
struct FormInner {
    state: FormState,
    validations: HashMap<String, ValidationSlot>,
    next_seq: u64,
    mounted: bool,
}

impl FormInner {
    fn dispatch(&mut self, name: &str) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.validations.entry(name.to_string()).or_default().seq = seq;
        seq
    }

    fn touch_and_surface(&mut self, name: &str) {
        self.state.apply(Action::Touch {
            name: name.to_string(),
        });
        if let Some(slot) = self.validations.get(name) {
            if self.state.error(name) != Some(slot.latent.as_str()) {
                self.state.apply(Action::SetError {
                    name: name.to_string(),
                    message: slot.latent.clone(),
                });
            }
        }
    }
}

/// Handle to a mounted form.
///
/// Cloning the handle is cheap; all clones share the same state. The internal
/// lock is never held across an await point, so events on other fields are
/// accepted while a validation or submission is pending.
#[derive(Clone)]
pub struct Form {
    schema: Arc<FormSchema>,
    options: Arc<FormOptions>,
    on_submit: SubmitHandler,
    inner: Arc<Mutex<FormInner>>,
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("schema", &self.schema)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Creates a form from a schema, a submit callback and options.
pub fn create_form(schema: FormSchema, on_submit: SubmitHandler, options: FormOptions) -> Form {
    Form::new(schema, on_submit, options)
}

impl Form {
    /// Creates a form. Values start at each field's initial value.
    pub fn new(schema: FormSchema, on_submit: SubmitHandler, options: FormOptions) -> Self {
        let state = FormState::new(&schema);
        debug!(fields = schema.len(), "form created");
        Self {
            schema: Arc::new(schema),
            options: Arc::new(options),
            on_submit,
            inner: Arc::new(Mutex::new(FormInner {
                state,
                validations: HashMap::new(),
                next_seq: 0,
                mounted: true,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handles a change of a field's value.
    ///
    /// The candidate is coerced by field type and validated; the formatted
    /// value is stored before any asynchronous validator resolves. An invalid
    /// value is stored all the same. When validation resolves, its message is
    /// written unless a newer change on the same field was dispatched in the
    /// meantime.
    ///
    /// Validators and formatters run without the form lock held, so they may
    /// read the form through a cloned handle.
    pub async fn change(&self, name: &str, raw: impl Into<FieldValue>) -> Result<()> {
        let field = self.schema.field(name)?;
        let candidate = field.field_type.coerce(raw.into());

        let validation = validate_field(field, &candidate, self.options.disable_validation);
        let formatted = format_value(field, candidate);

        let seq = {
            let mut inner = self.lock();
            if !inner.mounted {
                debug!(field = name, "ignoring change on unmounted form");
                return Ok(());
            }
            let seq = inner.dispatch(name);
            debug!(field = name, seq, "validation dispatched");
            inner.state.apply(Action::SetValue {
                name: name.to_string(),
                value: formatted,
            });
            seq
        };

        let message = validation.await.unwrap_or_default();
        self.settle(name, seq, message);
        Ok(())
    }

    /// Records a resolved validation unless it is stale.
    fn settle(&self, name: &str, seq: u64, message: String) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        if !inner.mounted {
            debug!(field = name, "discarding validation result after unmount");
            return;
        }
        let Some(slot) = inner.validations.get_mut(name).filter(|slot| slot.seq == seq) else {
            debug!(field = name, seq, "discarding stale validation result");
            return;
        };
        slot.latent.clone_from(&message);
        if self.options.show_field_errors || inner.state.is_touched(name) {
            inner.state.apply(Action::SetError {
                name: name.to_string(),
                message,
            });
        }
    }

    /// Handles a field losing focus.
    ///
    /// With deferred error display, the field becomes touched and its latest
    /// error is shown.
    pub fn blur(&self, name: &str) -> Result<()> {
        self.schema.field(name)?;
        if self.options.show_field_errors {
            return Ok(());
        }
        let mut inner = self.lock();
        if inner.mounted {
            inner.touch_and_surface(name);
        }
        Ok(())
    }

    /// Submits the form.
    ///
    /// Every field is marked touched, then the callback receives a snapshot of
    /// the current values. Outstanding field errors do not prevent the call;
    /// use [`Form::validate_all`] first for a hard gate. A request made while
    /// another submission is in flight does nothing.
    pub async fn submit(&self) -> SubmitOutcome {
        let snapshot = {
            let mut inner = self.lock();
            if !inner.mounted {
                return SubmitOutcome::Unmounted;
            }
            if inner.state.is_submitting() {
                debug!("submit ignored, submission already in flight");
                return SubmitOutcome::AlreadySubmitting;
            }
            inner.state.apply(Action::SetSubmitting(true));
            inner.state.apply(Action::SetSubmissionError(None));
            for field in self.schema.iter() {
                inner.touch_and_surface(&field.name);
            }
            inner.state.values().clone()
        };

        info!(fields = snapshot.len(), "submitting form");
        let result = (self.on_submit)(snapshot).await;

        let mut inner = self.lock();
        if !inner.mounted {
            debug!("discarding submission result after unmount");
            return SubmitOutcome::Unmounted;
        }
        inner.state.apply(Action::SetSubmitting(false));
        match result {
            Ok(()) => {
                info!("form submitted");
                SubmitOutcome::Submitted
            }
            Err(err) => {
                let message = err.to_string();
                warn!(error = %message, "form submission failed");
                inner
                    .state
                    .apply(Action::SetSubmissionError(Some(message.clone())));
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Validates every visible field against its current value.
    ///
    /// All fields checked are marked touched so their errors show. Returns
    /// whether no field reported an error.
    pub async fn validate_all(&self) -> bool {
        let values = {
            let inner = self.lock();
            if !inner.mounted {
                return false;
            }
            inner.state.values().clone()
        };

        let checks: Vec<_> = self
            .schema
            .iter()
            .filter(|field| is_visible(field, &values))
            .map(|field| {
                let value = values.get(&field.name).cloned().unwrap_or_default();
                let validation = validate_field(field, &value, self.options.disable_validation);
                (field.name.clone(), validation)
            })
            .collect();

        let pending: Vec<_> = {
            let mut inner = self.lock();
            checks
                .into_iter()
                .map(|(name, validation)| {
                    let seq = inner.dispatch(&name);
                    inner.state.apply(Action::Touch { name: name.clone() });
                    async move { (name, seq, validation.await) }
                })
                .collect()
        };

        let results = future::join_all(pending).await;
        let mut clean = true;
        for (name, seq, message) in results {
            clean &= message.is_none();
            self.settle(&name, seq, message.unwrap_or_default());
        }
        clean
    }

    /// Restores initial values and clears errors.
    ///
    /// Validations still in flight are discarded. Touched flags and the
    /// submission error survive unless the options say otherwise.
    pub fn reset(&self) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        if !inner.mounted {
            return;
        }
        let initial = inner.state.initial_values().clone();
        for (name, value) in initial {
            inner.state.apply(Action::SetValue { name, value });
        }
        inner.state.apply(Action::ResetErrors);
        inner.validations.clear();
        if self.options.clear_touched_on_reset {
            inner.state.apply(Action::ResetTouched);
        }
        if self.options.clear_submission_error_on_reset {
            inner.state.apply(Action::SetSubmissionError(None));
        }
        debug!("form reset");
    }

    /// Detaches the form. Later events and late async results are dropped.
    pub fn unmount(&self) {
        self.lock().mounted = false;
        debug!("form unmounted");
    }

    /// Returns whether the form is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.lock().mounted
    }

    /// Returns a snapshot of the stored values.
    pub fn values(&self) -> FormValues {
        self.lock().state.values().clone()
    }

    /// Returns a snapshot of the error messages.
    pub fn errors(&self) -> FormErrors {
        self.lock().state.errors().clone()
    }

    /// Returns a field's stored value.
    pub fn value(&self, name: &str) -> Option<FieldValue> {
        self.lock().state.value(name).cloned()
    }

    /// Returns a field's error message.
    pub fn error(&self, name: &str) -> Option<String> {
        self.lock().state.error(name).map(str::to_string)
    }

    /// Returns a field's derived status.
    pub fn status(&self, name: &str) -> Option<FieldStatus> {
        self.lock().state.status(name)
    }

    /// Returns whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.lock().state.is_submitting()
    }

    /// Returns the last submission failure.
    pub fn submission_error(&self) -> Option<String> {
        self.lock().state.submission_error().map(str::to_string)
    }

    /// Returns whether any value differs from its initial value.
    pub fn is_dirty(&self) -> bool {
        self.lock().state.is_form_dirty()
    }

    /// Returns a snapshot of the whole runtime state.
    pub fn state(&self) -> FormState {
        self.lock().state.clone()
    }

    /// Returns the render description of the current state.
    ///
    /// Visibility predicates are evaluated on a snapshot, outside the lock.
    pub fn view(&self) -> FormView {
        let state = self.state();
        FormView::build(&self.schema, &state, &self.options)
    }

    /// Returns the schema.
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Returns the options.
    pub fn options(&self) -> &FormOptions {
        &self.options
    }
}
