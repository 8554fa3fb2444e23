//! Range tables that classify a numeric outcome.
//!
//! A [`DescriptionTable`] is sorted ascending by `max_value`; lookup picks
//! the first entry whose `max_value` is at least the target. An entry may
//! narrow further by the roll's last digit through its `limited` list.
//! Labels, descriptions and results are either fixed or computed from the
//! [`LookupContext`].
//!
//! The same primitive backs success value, morale, fear, fate and injury
//! severity tables; see [`preset`].

pub mod preset;

use serde::{Deserialize, Serialize};

/// Outcome data handed to computed table fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LookupContext {
    /// A raw value, e.g. an injury level.
    pub value: i32,
    /// Last digit of the percentile roll.
    pub last_digit: u8,
    /// Numeric success level.
    pub success_level: i32,
    /// Success value (index plus success level adjustment).
    pub success_value: i32,
}

/// Which context field a table is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKey {
    /// [`LookupContext::value`].
    #[default]
    Value,
    /// [`LookupContext::success_level`].
    SuccessLevel,
    /// [`LookupContext::success_value`].
    SuccessValue,
}

/// A table field: a literal, or a function of the lookup context.
#[derive(Debug, Clone)]
pub enum Detail<T> {
    /// A fixed value.
    Fixed(T),
    /// Computed from the context at lookup time.
    Computed(fn(&LookupContext) -> T),
}

impl<T: Clone> Detail<T> {
    /// The field's value for a context.
    pub fn resolve(&self, ctx: &LookupContext) -> T {
        match self {
            Self::Fixed(v) => v.clone(),
            Self::Computed(f) => f(ctx),
        }
    }
}

impl From<&str> for Detail<String> {
    fn from(s: &str) -> Self {
        Self::Fixed(s.to_string())
    }
}

impl From<i32> for Detail<i32> {
    fn from(n: i32) -> Self {
        Self::Fixed(n)
    }
}

/// A last-digit refinement of a [`Descriptor`].
#[derive(Debug, Clone)]
pub struct LimitedDescriptor {
    /// Roll digits this refinement applies to.
    pub last_digits: Vec<u8>,
    /// Short label.
    pub label: Detail<String>,
    /// Long description.
    pub description: Detail<String>,
    /// Whether the outcome counts as a success.
    pub success: bool,
    /// Numeric result.
    pub result: Detail<i32>,
}

impl LimitedDescriptor {
    /// Build a refinement with a zero result.
    pub fn new(
        last_digits: impl IntoIterator<Item = u8>,
        label: impl Into<Detail<String>>,
        description: impl Into<Detail<String>>,
        success: bool,
    ) -> Self {
        Self {
            last_digits: last_digits.into_iter().collect(),
            label: label.into(),
            description: description.into(),
            success,
            result: Detail::Fixed(0),
        }
    }

    fn resolve(&self, ctx: &LookupContext) -> ResolvedDescription {
        ResolvedDescription {
            label: self.label.resolve(ctx),
            description: self.description.resolve(ctx),
            success: self.success,
            result: self.result.resolve(ctx),
        }
    }
}

/// One range of a description table.
#[derive(Debug, Clone)]
pub struct Descriptor {
    /// Inclusive upper bound of the range.
    pub max_value: i32,
    /// Short label.
    pub label: Detail<String>,
    /// Long description.
    pub description: Detail<String>,
    /// Whether the outcome counts as a success.
    pub success: bool,
    /// Numeric result.
    pub result: Detail<i32>,
    /// Last-digit refinements. When present, one of them must match.
    pub limited: Vec<LimitedDescriptor>,
}

impl Descriptor {
    /// Build a range entry with a zero result and no refinements.
    pub fn new(
        max_value: i32,
        label: impl Into<Detail<String>>,
        description: impl Into<Detail<String>>,
        success: bool,
    ) -> Self {
        Self {
            max_value,
            label: label.into(),
            description: description.into(),
            success,
            result: Detail::Fixed(0),
            limited: Vec::new(),
        }
    }

    /// Set the numeric result.
    pub fn with_result(mut self, result: impl Into<Detail<i32>>) -> Self {
        self.result = result.into();
        self
    }

    /// Add a last-digit refinement.
    pub fn with_limited(mut self, limited: LimitedDescriptor) -> Self {
        self.limited.push(limited);
        self
    }

    fn resolve(&self, ctx: &LookupContext) -> ResolvedDescription {
        ResolvedDescription {
            label: self.label.resolve(ctx),
            description: self.description.resolve(ctx),
            success: self.success,
            result: self.result.resolve(ctx),
        }
    }
}

/// The outcome of a table lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDescription {
    /// Short label.
    pub label: String,
    /// Long description.
    pub description: String,
    /// Whether the outcome counts as a success.
    pub success: bool,
    /// Numeric result.
    pub result: i32,
}

/// A sorted range table.
#[derive(Debug, Clone)]
pub struct DescriptionTable {
    /// Table name, for display.
    pub name: String,
    /// Which context field selects the range.
    pub key: LookupKey,
    entries: Vec<Descriptor>,
}

impl DescriptionTable {
    /// Build a table; entries are sorted by `max_value`.
    pub fn new(name: impl Into<String>, key: LookupKey, mut entries: Vec<Descriptor>) -> Self {
        entries.sort_by_key(|e| e.max_value);
        Self {
            name: name.into(),
            key,
            entries,
        }
    }

    /// The entries, ascending by `max_value`.
    pub fn entries(&self) -> &[Descriptor] {
        &self.entries
    }

    /// Classify a context.
    ///
    /// Returns `None` when the target is above every range, or when the
    /// matching range has refinements and none lists the last digit.
    pub fn lookup(&self, ctx: &LookupContext) -> Option<ResolvedDescription> {
        let target = match self.key {
            LookupKey::Value => ctx.value,
            LookupKey::SuccessLevel => ctx.success_level,
            LookupKey::SuccessValue => ctx.success_value,
        };
        let Some(entry) = self.entries.iter().find(|e| e.max_value >= target) else {
            tracing::debug!(table = %self.name, target, "no range covers target");
            return None;
        };
        if entry.limited.is_empty() {
            return Some(entry.resolve(ctx));
        }
        let limited = entry
            .limited
            .iter()
            .find(|l| l.last_digits.contains(&ctx.last_digit));
        if limited.is_none() {
            tracing::debug!(table = %self.name, target, last_digit = ctx.last_digit, "no digit refinement matches");
        }
        limited.map(|l| l.resolve(ctx))
    }

    /// Classify a raw value with no roll context.
    pub fn lookup_value(&self, value: i32) -> Option<ResolvedDescription> {
        self.lookup(&LookupContext {
            value,
            ..LookupContext::default()
        })
    }
}
