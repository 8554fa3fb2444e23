//! Consistency checks for rule variants.
//!
//! Errors make a variant unusable; warnings flag settings that are legal
//! but probably unintended.

use crate::rules::VariantConfig;

/// Upper limit for `max_impact_dice`.
const DICE_COUNT_LIMIT: u32 = 1000;

/// Die sizes that occur in published material.
const STANDARD_DICE: &[u32] = &[4, 6, 8, 10, 12, 20, 100];

/// A warning or error found while validating a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The configuration field the issue concerns.
    pub field: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.field, self.message)
    }
}

/// Validate a variant. Returns every issue found, errors and warnings.
pub fn validate_variant(config: &VariantConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    validate_targets(config, &mut issues);
    validate_digits("crit_success_digits", &config.crit_success_digits, &mut issues);
    validate_digits("crit_failure_digits", &config.crit_failure_digits, &mut issues);
    if config.crit_success_digits.is_empty() && config.crit_failure_digits.is_empty() {
        issues.push(ValidationIssue::warning(
            "crit_success_digits",
            "no critical digits, tests are never critical",
        ));
    }
    validate_dice(config, &mut issues);

    if config.max_impact_dice > DICE_COUNT_LIMIT {
        issues.push(ValidationIssue::error(
            "max_impact_dice",
            format!(
                "{} exceeds the limit of {DICE_COUNT_LIMIT}",
                config.max_impact_dice
            ),
        ));
    }

    if config.sec_mod_increment <= 0 {
        issues.push(ValidationIssue::error(
            "sec_mod_increment",
            format!("must be positive, got {}", config.sec_mod_increment),
        ));
    }

    for (aspect, bonus) in &config.aspect_tactical_advantage {
        if *bonus < 0 {
            issues.push(ValidationIssue::warning(
                "aspect_tactical_advantage",
                format!("{aspect} has a negative advantage ({bonus})"),
            ));
        }
    }
    issues
}

fn validate_targets(config: &VariantConfig, issues: &mut Vec<ValidationIssue>) {
    if config.min_target > config.max_target {
        issues.push(ValidationIssue::error(
            "min_target",
            format!(
                "min ({}) is above max ({})",
                config.min_target, config.max_target
            ),
        ));
    }
    if config.min_target < 1 || config.max_target > 100 {
        issues.push(ValidationIssue::warning(
            "max_target",
            format!(
                "range {}-{} extends beyond a d100 roll",
                config.min_target, config.max_target
            ),
        ));
    }
}

fn validate_digits(field: &str, digits: &[u8], issues: &mut Vec<ValidationIssue>) {
    for digit in digits.iter().filter(|d| **d > 9) {
        issues.push(ValidationIssue::error(
            field,
            format!("{digit} is not a single digit"),
        ));
    }
}

fn validate_dice(config: &VariantConfig, issues: &mut Vec<ValidationIssue>) {
    if config.impact_dice.iter().all(|d| *d == 0) {
        issues.push(ValidationIssue::error("impact_dice", "no usable die sizes"));
    }
    for die in &config.impact_dice {
        match die {
            0 => {}
            1 => issues.push(ValidationIssue::error("impact_dice", "d1 is not a die")),
            d if !STANDARD_DICE.contains(d) => issues.push(ValidationIssue::warning(
                "impact_dice",
                format!("unusual die size d{d}"),
            )),
            _ => {}
        }
    }
}
