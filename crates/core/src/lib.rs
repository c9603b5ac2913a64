//! # Intake Core
//!
//! Core state and update logic for the clinical intake form.
//!
//! This crate contains the pure data operations behind the multi-section intake form:
//! - The intake record schema and its typed per-section patches
//! - The form store that owns one record per session and mediates every mutation
//! - Toggle-set handling for checkbox-backed list fields
//! - Step navigation across the fixed ordered list of sections
//! - Derived section summaries, option catalogues and replayable form events
//!
//! **No rendering concerns**: terminal shells and batch tooling live in the `clinivora`
//! and `intake-cli` binaries, which call into [`FormStore`].

pub mod catalogue;
pub mod config;
pub mod error;
pub mod event;
pub mod field;
pub mod navigator;
pub mod patch;
pub mod record;
pub mod script;
pub mod section;
pub mod store;
pub mod suggestions;
pub mod summary;
pub mod toggle;

pub use config::CoreConfig;
pub use error::{IntakeError, IntakeResult};
pub use event::FormEvent;
pub use field::{FlagField, TextField};
pub use intake_types::{Confidence, NonEmptyText, TypesError};
pub use navigator::Progress;
pub use patch::{
    AiDataPatch, ComplaintsPatch, DemographicsPatch, ExaminationPatch, FeedbackPatch,
    HistoryPatch, InvestigationsPatch, SectionPatch,
};
pub use record::{
    AiData, Complaints, Demographics, Examination, Feedback, History, IntakeRecord,
    Investigations, RiskFactors, Sex, SuspectedDiagnosis, VitalSign, Vitals,
};
pub use script::Script;
pub use section::SectionKey;
pub use store::{Change, FormStore, SessionInfo, SubscriptionId};
pub use suggestions::{StaticSuggestions, SuggestionService};
pub use summary::SectionSummary;
pub use toggle::{toggle, ToggleField};
