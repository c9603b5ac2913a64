//! The form store: single source of truth for one intake session.
//!
//! A [`FormStore`] is constructed explicitly and handed by reference to whatever renders
//! the form. It owns at most one live session: the [`IntakeRecord`], the active section and
//! the subscribers interested in changes. Between [`FormStore::start`] and
//! [`FormStore::end`] every read and write goes through the store; outside that window
//! they fail with [`IntakeError::InvalidState`].
//!
//! ## Update contract
//!
//! [`FormStore::update`] merges a typed [`SectionPatch`] into exactly one section. Fields the
//! patch omits are preserved, other sections are untouched, and nested objects carried by
//! the patch replace their previous value whole (see [`crate::patch`]).
//!
//! ## Notifications
//!
//! Subscribers are called synchronously, in subscription order, after each mutation has
//! been applied. Every update notifies, even one that leaves the values unchanged.
//! Navigation notifies only when the active section actually changes.
//!
//! The store is single-threaded: all methods take `&mut self` and nothing blocks.

use crate::navigator::{self, Progress};
use crate::suggestions::{StaticSuggestions, SuggestionService};
use crate::{
    CoreConfig, FlagField, FormEvent, IntakeError, IntakeRecord, IntakeResult, SectionKey,
    SectionPatch, TextField, ToggleField,
};
use chrono::{DateTime, Utc};
use intake_types::NonEmptyText;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// What changed in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    /// A section's slice of the record was updated.
    Updated(SectionKey),
    /// The active section moved.
    Navigated { from: SectionKey, to: SectionKey },
}

/// Handle returned by [`FormStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Change, &IntakeRecord)>;

/// Metadata for a live session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub clinician: Option<NonEmptyText>,
}

struct Session {
    info: SessionInfo,
    record: IntakeRecord,
    active: SectionKey,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_listener_id: u64,
}

impl Session {
    fn notify(&mut self, change: Change) {
        for listener in self.listeners.values_mut() {
            listener(&change, &self.record);
        }
    }
}

pub struct FormStore {
    cfg: Arc<CoreConfig>,
    suggestions: Box<dyn SuggestionService>,
    session: Option<Session>,
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("cfg", &self.cfg)
            .field("session", &self.session.as_ref().map(|s| &s.info))
            .finish_non_exhaustive()
    }
}

impl FormStore {
    /// Creates a store with no live session.
    ///
    /// # Arguments
    ///
    /// * `cfg` - Core configuration resolved at startup.
    /// * `suggestions` - Source of the AI suggestion content placed on each new record.
    pub fn new(cfg: Arc<CoreConfig>, suggestions: Box<dyn SuggestionService>) -> Self {
        Self {
            cfg,
            suggestions,
            session: None,
        }
    }

    /// Creates a store that uses the fixed mock suggestions.
    pub fn with_static_suggestions(cfg: Arc<CoreConfig>) -> Self {
        Self::new(cfg, Box::new(StaticSuggestions))
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Starts a session with a fresh record.
    ///
    /// The record is empty apart from the AI suggestion content, which is fetched once
    /// here and never recomputed. The active section is the configured initial section.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidState`] if a session is already live, or the
    /// suggestion service's error if it fails.
    pub fn start(&mut self) -> IntakeResult<&SessionInfo> {
        if self.session.is_some() {
            return Err(IntakeError::InvalidState(
                "a form session is already active".into(),
            ));
        }

        let blank = IntakeRecord::default();
        let ai_data = self.suggestions.suggest(&blank)?;
        let info = SessionInfo {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            clinician: self.cfg.clinician().cloned(),
        };
        tracing::info!(session = %info.id, "started intake session");

        let session = self.session.insert(Session {
            info,
            record: IntakeRecord::new(ai_data),
            active: self.cfg.initial_section(),
            listeners: BTreeMap::new(),
            next_listener_id: 0,
        });
        Ok(&session.info)
    }

    /// Ends the live session and hands back its final record.
    ///
    /// Subscribers are dropped. Nothing is persisted; the caller decides what, if
    /// anything, to do with the returned record.
    pub fn end(&mut self) -> IntakeResult<IntakeRecord> {
        let session = self.session.take().ok_or_else(inactive)?;
        tracing::info!(session = %session.info.id, "ended intake session");
        Ok(session.record)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> IntakeResult<&SessionInfo> {
        Ok(&self.live()?.info)
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// The current record.
    pub fn record(&self) -> IntakeResult<&IntakeRecord> {
        Ok(&self.live()?.record)
    }

    pub fn active_section(&self) -> IntakeResult<SectionKey> {
        Ok(self.live()?.active)
    }

    pub fn progress(&self) -> IntakeResult<Progress> {
        Ok(navigator::progress(self.live()?.active))
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// Merges `patch` into its section and notifies subscribers.
    pub fn update(&mut self, patch: impl Into<SectionPatch>) -> IntakeResult<()> {
        let patch = patch.into();
        let session = self.live_mut()?;
        let section = patch.section();
        let record = &mut session.record;

        match patch {
            SectionPatch::Demographics(p) => p.apply(&mut record.demographics),
            SectionPatch::Complaints(p) => p.apply(&mut record.complaints),
            SectionPatch::History(p) => p.apply(&mut record.history),
            SectionPatch::Examination(p) => p.apply(&mut record.examination),
            SectionPatch::Investigations(p) => p.apply(&mut record.investigations),
            SectionPatch::Feedback(p) => p.apply(&mut record.feedback),
            SectionPatch::AiData(p) => p.apply(&mut record.ai_data),
        }
        tracing::debug!(%section, "updated section");

        session.notify(Change::Updated(section));
        Ok(())
    }

    /// Ticks (`present = true`) or unticks `item` in a list field.
    pub fn toggle(&mut self, field: ToggleField, item: &str, present: bool) -> IntakeResult<()> {
        let patch = field.toggled(self.record()?, item, present);
        self.update(patch)
    }

    pub fn set_text(&mut self, field: TextField, value: String) -> IntakeResult<()> {
        let patch = field.patch(self.record()?, value)?;
        self.update(patch)
    }

    pub fn set_flag(&mut self, field: FlagField, value: Option<bool>) -> IntakeResult<()> {
        let patch = field.patch(self.record()?, value);
        self.update(patch)
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn set_active_section(&mut self, key: SectionKey) -> IntakeResult<()> {
        let session = self.live_mut()?;
        let from = session.active;
        if from == key {
            return Ok(());
        }

        session.active = key;
        tracing::debug!(%from, to = %key, "changed active section");
        session.notify(Change::Navigated { from, to: key });
        Ok(())
    }

    /// Sets the active section from its wire identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidKey`] for an unknown identifier; the active section
    /// is left unchanged.
    pub fn set_active_section_str(&mut self, key: &str) -> IntakeResult<()> {
        self.live()?;
        let key = key.parse::<SectionKey>().inspect_err(|err| {
            tracing::warn!("rejected section change: {err}");
        })?;
        self.set_active_section(key)
    }

    /// Steps to the next section; stays put at the last one.
    pub fn next_section(&mut self) -> IntakeResult<SectionKey> {
        let next = navigator::next(self.active_section()?);
        self.set_active_section(next)?;
        Ok(next)
    }

    /// Steps to the previous section; stays put at the first one.
    pub fn previous_section(&mut self) -> IntakeResult<SectionKey> {
        let previous = navigator::previous(self.active_section()?);
        self.set_active_section(previous)?;
        Ok(previous)
    }

    /// Applies one form event.
    pub fn apply(&mut self, event: FormEvent) -> IntakeResult<()> {
        match event {
            FormEvent::Update(patch) => self.update(patch),
            FormEvent::Set { field, value } => self.set_text(field, value),
            FormEvent::Flag { field, value } => self.set_flag(field, value),
            FormEvent::Toggle {
                field,
                item,
                present,
            } => self.toggle(field, &item, present),
            FormEvent::Goto(key) => self.set_active_section(key),
            FormEvent::Next => self.next_section().map(|_| ()),
            FormEvent::Previous => self.previous_section().map(|_| ()),
        }
    }

    // ------------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------------

    /// Registers a listener for changes in the live session.
    ///
    /// The listener lives until it is unsubscribed or the session ends.
    pub fn subscribe<F>(&mut self, listener: F) -> IntakeResult<SubscriptionId>
    where
        F: FnMut(&Change, &IntakeRecord) + 'static,
    {
        let session = self.live_mut()?;
        let id = SubscriptionId(session.next_listener_id);
        session.next_listener_id = session.next_listener_id.wrapping_add(1);
        session.listeners.insert(id, Box::new(listener));
        Ok(id)
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| session.listeners.remove(&id).is_some())
    }

    /// Number of listeners registered in the live session.
    pub fn listener_count(&self) -> IntakeResult<usize> {
        Ok(self.live()?.listeners.len())
    }

    fn live(&self) -> IntakeResult<&Session> {
        self.session.as_ref().ok_or_else(inactive)
    }

    fn live_mut(&mut self) -> IntakeResult<&mut Session> {
        self.session.as_mut().ok_or_else(inactive)
    }
}

fn inactive() -> IntakeError {
    IntakeError::InvalidState("no active form session".into())
}
