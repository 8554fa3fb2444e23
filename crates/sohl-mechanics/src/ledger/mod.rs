//! The modifier ledger: a base value plus a keyed stack of modifications.
//!
//! Entries are keyed by their source abbreviation. Adding a second entry
//! under the same key replaces the first and moves it to the end of the
//! display order. Evaluation ignores insertion order: entries are
//! processed by operator rank (custom, multiply, add, downgrade, upgrade,
//! override), so the effective value depends only on the set of entries
//! and the base.
//!
//! Override rules:
//! - While a non-zero OVERRIDE is present, any other new entry is dropped.
//! - A new OVERRIDE arriving while any OVERRIDE is present clears every
//!   entry and becomes the only one.
//! - A zero OVERRIDE does not block new entries, although it still forces
//!   the effective value to 0 at the end of evaluation.

pub mod impact;
pub mod mastery;
pub mod source;

pub use impact::{Aspect, ImpactLedger};
pub use mastery::MasteryLevelLedger;
pub use source::{DisabledReason, ModSource};

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{SohlError, SohlResult};

/// How an entry changes the running value.
///
/// Variants are declared in evaluation order; lower ranks apply first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Replace the running value with the ledger's custom handler result.
    Custom = 0,
    /// Multiply the running value.
    Multiply = 1,
    /// Add to the running value.
    Add = 2,
    /// Clamp to at most the value.
    Downgrade = 3,
    /// Clamp to at least the value.
    Upgrade = 4,
    /// Force the exact value.
    Override = 5,
}

impl Operator {
    /// Symbol used in abbreviation strings.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Custom => "★",
            Self::Multiply => "×",
            Self::Add => "+",
            Self::Downgrade => "≤",
            Self::Upgrade => "≥",
            Self::Override => "=",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Custom => "custom",
            Self::Multiply => "multiply",
            Self::Add => "add",
            Self::Downgrade => "downgrade",
            Self::Upgrade => "upgrade",
            Self::Override => "override",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Operator {
    type Err = SohlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "custom" => Ok(Self::Custom),
            "multiply" | "mul" | "x" | "×" => Ok(Self::Multiply),
            "add" | "+" => Ok(Self::Add),
            "downgrade" | "ceiling" | "max" | "≤" => Ok(Self::Downgrade),
            "upgrade" | "floor" | "min" | "≥" => Ok(Self::Upgrade),
            "override" | "set" | "=" => Ok(Self::Override),
            other => Err(SohlError::InvalidModifier(format!(
                "unknown operator '{other}'"
            ))),
        }
    }
}

/// The value carried by a modifier entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModifierValue {
    /// A boolean, for flag-like ledgers.
    Bool(bool),
    /// A number.
    Number(f64),
    /// Raw text, only kept for CUSTOM entries.
    Text(String),
}

impl ModifierValue {
    /// Text marking a CUSTOM entry as the disabled sentinel.
    pub const DISABLED: &'static str = "disabled";

    /// Parse text into the most specific value: boolean, number, or text.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Self::Number(n),
                _ => Self::Text(s.to_string()),
            },
        }
    }

    /// Numeric reading of the value; booleans read as 1 or 0.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(bit(*b)),
            Self::Text(t) => t.trim().parse().ok(),
        }
    }

    /// True for numeric zero and boolean false.
    pub fn is_zero(&self) -> bool {
        self.as_number() == Some(0.0)
    }

    fn coerce_for(self, operator: Operator, abbrev: &str) -> SohlResult<Self> {
        match self {
            Self::Number(n) if n.is_nan() => Ok(Self::Number(0.0)),
            Self::Number(_) | Self::Bool(_) => Ok(self),
            Self::Text(text) => match Self::parse(&text) {
                Self::Text(raw) if operator == Operator::Custom => Ok(Self::Text(raw)),
                Self::Text(raw) => Err(SohlError::NonNumericValue {
                    abbrev: abbrev.to_string(),
                    value: raw,
                }),
                parsed => Ok(parsed),
            },
        }
    }
}

impl std::fmt::Display for ModifierValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(t) => write!(f, "{t}"),
        }
    }
}

impl From<f64> for ModifierValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for ModifierValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for ModifierValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for ModifierValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for ModifierValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ModifierValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// One sourced modification stored in a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierEntry {
    /// Where the modification came from.
    pub source: ModSource,
    /// How it changes the value.
    pub operator: Operator,
    /// The operand.
    pub value: ModifierValue,
    #[serde(skip)]
    seq: u64,
}

impl ModifierEntry {
    /// Create a detached entry.
    pub fn new(
        source: impl Into<ModSource>,
        operator: Operator,
        value: impl Into<ModifierValue>,
    ) -> Self {
        Self {
            source: source.into(),
            operator,
            value: value.into(),
            seq: 0,
        }
    }

    /// The key this entry is stored under.
    pub fn abbrev(&self) -> &str {
        &self.source.abbrev
    }

    /// Display token for the abbreviation string, e.g. "Enc -3" or "Str ×2".
    pub fn token(&self) -> Option<String> {
        let abbrev = self.abbrev();
        let value = &self.value;
        match self.operator {
            Operator::Add => match value {
                ModifierValue::Number(n) if *n > 0.0 => Some(format!("{abbrev} +{n}")),
                _ => Some(format!("{abbrev} {value}")),
            },
            Operator::Custom => match value {
                ModifierValue::Text(t) if t == ModifierValue::DISABLED => Some(abbrev.to_string()),
                _ => None,
            },
            op => Some(format!("{abbrev} {}{value}", op.symbol())),
        }
    }
}

/// A parsed request to apply one modification.
///
/// The text form is `NAME:ABBREV:OPERATOR:VALUE`, e.g.
/// `Encumbrance:Enc:add:-10`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierRequest {
    /// Where the modification comes from.
    pub source: ModSource,
    /// Operator to apply.
    pub operator: Operator,
    /// Operand.
    pub value: ModifierValue,
}

impl ModifierRequest {
    /// Build a request.
    pub fn new(
        source: impl Into<ModSource>,
        operator: Operator,
        value: impl Into<ModifierValue>,
    ) -> Self {
        Self {
            source: source.into(),
            operator,
            value: value.into(),
        }
    }
}

impl FromStr for ModifierRequest {
    type Err = SohlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(4, ':').collect();
        let [name, abbrev, operator, value] = parts.as_slice() else {
            return Err(SohlError::InvalidModifier(format!(
                "expected NAME:ABBREV:OPERATOR:VALUE, got '{s}'"
            )));
        };
        let abbrev = abbrev.trim();
        if abbrev.is_empty() {
            return Err(SohlError::InvalidModifier(format!(
                "missing abbreviation in '{s}'"
            )));
        }
        Ok(Self {
            source: ModSource::new(name.trim(), abbrev),
            operator: operator.parse()?,
            value: ModifierValue::parse(value),
        })
    }
}

/// Snapshot of a ledger after evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLedger {
    /// The base value, if any.
    pub base: Option<f64>,
    /// The fully resolved value.
    pub effective: f64,
    /// `effective - base`.
    pub modifier: f64,
    /// Base divided by ten, truncated.
    pub index: i32,
    /// Display string of all entries.
    pub abbrev: String,
    /// Why the ledger is inert, if it is.
    pub disabled: Option<DisabledReason>,
    /// Entries in insertion order.
    pub entries: Vec<ModifierEntry>,
}

#[derive(Clone)]
struct CustomHandler(Arc<dyn Fn(&ModifierValue) -> Option<f64> + Send + Sync>);

impl std::fmt::Debug for CustomHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CustomHandler(..)")
    }
}

/// A base value with a keyed stack of modifications.
///
/// The effective value and abbreviation string are recomputed after every
/// mutation, so reads never see stale data.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    base: Option<f64>,
    entries: BTreeMap<String, ModifierEntry>,
    next_seq: u64,
    disabled: Option<DisabledReason>,
    custom: Option<CustomHandler>,
    effective: f64,
    abbrev: String,
}

impl Ledger {
    /// Create a ledger with a base value.
    pub fn new(base: f64) -> Self {
        let mut ledger = Self {
            base: Some(base),
            ..Self::default()
        };
        ledger.refresh();
        ledger
    }

    /// Register the handler used by CUSTOM entries.
    ///
    /// The handler receives the entry's value; a numeric result replaces
    /// the running value.
    pub fn with_custom(
        mut self,
        handler: impl Fn(&ModifierValue) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        self.custom = Some(CustomHandler(Arc::new(handler)));
        self.refresh();
        self
    }

    /// Returns true if a custom handler is registered.
    pub fn has_custom_handler(&self) -> bool {
        self.custom.is_some()
    }

    /// The base value, if any.
    pub fn base(&self) -> Option<f64> {
        self.base
    }

    /// Returns true if a base value is set.
    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    /// Replace the base value.
    pub fn set_base(&mut self, base: f64) {
        self.base = Some(base);
        self.refresh();
    }

    /// Remove the base value.
    pub fn clear_base(&mut self) {
        self.base = None;
        self.refresh();
    }

    /// The fully resolved value.
    pub fn effective(&self) -> f64 {
        self.effective
    }

    /// Net change from the base value.
    pub fn modifier(&self) -> f64 {
        round3(self.effective - self.base.unwrap_or(0.0))
    }

    /// Base divided by ten, truncated toward zero.
    pub fn index(&self) -> i32 {
        self.base.map_or(0, |b| (b / 10.0).trunc() as i32)
    }

    /// Display string, e.g. "Str +5, Enc -3".
    pub fn abbrev(&self) -> &str {
        &self.abbrev
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> Vec<&ModifierEntry> {
        let mut entries: Vec<&ModifierEntry> = self.entries.values().collect();
        entries.sort_by_key(|e| e.seq);
        entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the ledger has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by source abbreviation.
    pub fn get(&self, abbrev: &str) -> Option<&ModifierEntry> {
        self.entries.get(abbrev)
    }

    /// Returns true if an entry with this abbreviation exists.
    pub fn has(&self, abbrev: &str) -> bool {
        self.entries.contains_key(abbrev)
    }

    /// Remove an entry by source abbreviation.
    pub fn remove(&mut self, abbrev: &str) -> Option<ModifierEntry> {
        let removed = self.entries.remove(abbrev);
        if removed.is_some() {
            self.refresh();
        }
        removed
    }

    /// Why the ledger is inert, if it is.
    pub fn disabled(&self) -> Option<DisabledReason> {
        self.disabled
    }

    /// Returns true if the ledger is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.is_some()
    }

    /// Disable the ledger. Its effective value becomes 0.
    pub fn set_disabled(&mut self, reason: DisabledReason) {
        self.disabled = Some(reason);
        self.refresh();
    }

    /// Re-enable the ledger.
    pub fn clear_disabled(&mut self) {
        self.disabled = None;
        self.refresh();
    }

    /// Add a number to the value.
    pub fn add(
        &mut self,
        source: impl Into<ModSource>,
        value: impl Into<ModifierValue>,
    ) -> SohlResult<&mut Self> {
        self.operate(source.into(), Operator::Add, value.into())
    }

    /// Multiply the value.
    pub fn multiply(
        &mut self,
        source: impl Into<ModSource>,
        value: impl Into<ModifierValue>,
    ) -> SohlResult<&mut Self> {
        self.operate(source.into(), Operator::Multiply, value.into())
    }

    /// Force the value.
    pub fn set(
        &mut self,
        source: impl Into<ModSource>,
        value: impl Into<ModifierValue>,
    ) -> SohlResult<&mut Self> {
        self.operate(source.into(), Operator::Override, value.into())
    }

    /// Raise the value to at least `value`.
    pub fn floor(
        &mut self,
        source: impl Into<ModSource>,
        value: impl Into<ModifierValue>,
    ) -> SohlResult<&mut Self> {
        self.operate(source.into(), Operator::Upgrade, value.into())
    }

    /// Lower the value to at most `value`.
    pub fn ceiling(
        &mut self,
        source: impl Into<ModSource>,
        value: impl Into<ModifierValue>,
    ) -> SohlResult<&mut Self> {
        self.operate(source.into(), Operator::Downgrade, value.into())
    }

    /// Add a CUSTOM entry. Fails without a registered handler.
    pub fn custom(
        &mut self,
        source: impl Into<ModSource>,
        value: impl Into<ModifierValue>,
    ) -> SohlResult<&mut Self> {
        self.operate(source.into(), Operator::Custom, value.into())
    }

    /// Apply a request with any operator.
    pub fn apply(&mut self, request: ModifierRequest) -> SohlResult<&mut Self> {
        self.operate(request.source, request.operator, request.value)
    }

    /// Fold another ledger in as a single ADD entry.
    ///
    /// With `include_base` the other's effective value is added, otherwise
    /// only its net modifier.
    pub fn add_ledger(
        &mut self,
        source: impl Into<ModSource>,
        other: &Ledger,
        include_base: bool,
    ) -> SohlResult<&mut Self> {
        let value = if include_base {
            other.effective()
        } else {
            other.modifier()
        };
        self.add(source, value)
    }

    /// Snapshot the ledger.
    pub fn resolve(&self) -> ResolvedLedger {
        ResolvedLedger {
            base: self.base,
            effective: self.effective,
            modifier: self.modifier(),
            index: self.index(),
            abbrev: self.abbrev.clone(),
            disabled: self.disabled,
            entries: self.entries().into_iter().cloned().collect(),
        }
    }

    fn operate(
        &mut self,
        source: ModSource,
        operator: Operator,
        value: ModifierValue,
    ) -> SohlResult<&mut Self> {
        let value = value.coerce_for(operator, &source.abbrev)?;
        if operator == Operator::Custom && !self.has_custom_handler() {
            return Err(SohlError::NoCustomHandler {
                abbrev: source.abbrev.into_owned(),
            });
        }

        let active_override = self
            .entries
            .values()
            .find(|e| e.operator == Operator::Override)
            .map(|e| e.value.is_zero());
        match (active_override, operator == Operator::Override) {
            (Some(false), false) => {
                tracing::debug!(abbrev = %source.abbrev, "ledger is overridden, dropping modifier");
                return Ok(self);
            }
            (Some(_), true) => self.entries.clear(),
            _ => {}
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let key = source.abbrev.to_string();
        self.entries.insert(
            key,
            ModifierEntry {
                source,
                operator,
                value,
                seq,
            },
        );
        self.refresh();
        Ok(self)
    }

    fn refresh(&mut self) {
        self.effective = self.evaluate();
        self.abbrev = match self.disabled {
            Some(reason) => reason.abbrev().to_string(),
            None => self
                .entries()
                .iter()
                .filter_map(|e| e.token())
                .collect::<Vec<_>>()
                .join(", "),
        };
    }

    fn evaluate(&self) -> f64 {
        if self.disabled.is_some() {
            return 0.0;
        }

        let mut ordered: Vec<&ModifierEntry> = self.entries.values().collect();
        ordered.sort_by_key(|e| (e.operator, e.seq));

        let mut effective = self.base.unwrap_or(0.0);
        let mut bounds = Bounds::default();
        for entry in ordered {
            match (entry.operator, &entry.value) {
                (Operator::Custom, value) => {
                    let result = self.custom.as_ref().and_then(|h| (h.0)(value));
                    if let Some(n) = result.filter(|n| n.is_finite()) {
                        effective = n;
                    }
                }
                (Operator::Add, ModifierValue::Bool(b)) => {
                    if effective == 0.0 {
                        effective = bit(*b);
                    }
                }
                (Operator::Multiply, ModifierValue::Bool(b)) => {
                    effective = bit(*b && effective != 0.0);
                }
                // Boolean bounds clamp into 0..=1 whatever the flag.
                (Operator::Upgrade, ModifierValue::Bool(_)) => bounds.push(Operator::Upgrade, 0.0),
                (Operator::Downgrade, ModifierValue::Bool(_)) => {
                    bounds.push(Operator::Downgrade, 1.0);
                }
                (Operator::Add, ModifierValue::Number(n)) => effective += n,
                (Operator::Multiply, ModifierValue::Number(n)) => effective *= n,
                (op, value) => {
                    if let Some(n) = value.as_number() {
                        bounds.push(op, n);
                    }
                }
            }
        }

        round3(bounds.apply(effective))
    }
}

#[derive(Default)]
struct Bounds {
    floor: Option<f64>,
    ceiling: Option<f64>,
    forced: Option<f64>,
}

impl Bounds {
    fn push(&mut self, operator: Operator, value: f64) {
        match operator {
            Operator::Upgrade => self.floor = Some(self.floor.map_or(value, |f| f.max(value))),
            Operator::Downgrade => {
                self.ceiling = Some(self.ceiling.map_or(value, |c| c.min(value)));
            }
            Operator::Override => self.forced = Some(value),
            _ => {}
        }
    }

    fn apply(&self, mut value: f64) -> f64 {
        if let Some(floor) = self.floor {
            value = value.max(floor);
        }
        if let Some(ceiling) = self.ceiling {
            value = value.min(ceiling);
        }
        if let Some(forced) = self.forced {
            value = forced;
        }
        if value.is_nan() { 0.0 } else { value }
    }
}

/// Resolve a base value and a list of requests in one pure step.
///
/// Equivalent to building a [`Ledger`], applying every request in order,
/// and taking [`Ledger::resolve`].
pub fn compute_ledger(
    base: Option<f64>,
    requests: &[ModifierRequest],
) -> SohlResult<ResolvedLedger> {
    let mut ledger = match base {
        Some(b) => Ledger::new(b),
        None => Ledger::default(),
    };
    for request in requests {
        ledger.apply(request.clone())?;
    }
    Ok(ledger.resolve())
}

fn bit(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// Round to three decimal places, folding negative zero into zero.
pub(crate) fn round3(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}
