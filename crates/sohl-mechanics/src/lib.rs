//! Modifier and resolution engine for Song of Heroic Lands.
//!
//! A [`Ledger`] holds a base value plus a keyed stack of sourced
//! modifications and resolves them into a single effective value.
//! Mastery-level and impact ledgers specialise it for percentile tests
//! and damage rolls. The [`resolution`] module turns those ledgers into
//! success tests, opposed tests, and impact results, and [`describe`]
//! classifies outcomes through range tables (success value, morale,
//! fear, injury severity).
//!
//! Game variants are data, not subclasses: a [`VariantConfig`] carries
//! target ranges, critical digits, allowed impact dice and tactical
//! advantage tables, and [`LedgerFactory`] builds ledgers from it.

pub mod describe;
pub mod dice;
pub mod error;
pub mod ledger;
pub mod registry;
pub mod resolution;
pub mod rules;
pub mod validate;

pub use describe::{DescriptionTable, Descriptor, LookupContext, LookupKey, ResolvedDescription};
pub use dice::{DicePool, Die, DieResult, RollResult, Roller, ScriptedRoller};
pub use error::{SohlError, SohlResult};
pub use ledger::{
    Aspect, DisabledReason, ImpactLedger, Ledger, MasteryLevelLedger, ModSource, ModifierEntry,
    ModifierRequest, ModifierValue, Operator, ResolvedLedger, compute_ledger,
};
pub use registry::{AnyLedger, LedgerFactory, LedgerKind};
pub use resolution::{
    ImpactResult, OpposedTest, RollMode, Side, SuccessLevel, SuccessTest, TestKind, TestOptions,
};
pub use rules::VariantConfig;
pub use validate::{ValidationIssue, validate_variant};
