//! Ready-made description tables.

use super::{DescriptionTable, Descriptor, Detail, LimitedDescriptor, LookupContext, LookupKey};
use crate::resolution::SuccessLevel;

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 5] = ["success-value", "morale", "fear", "fate", "injury"];

/// Look a preset table up by name.
pub fn by_name(name: &str) -> Option<DescriptionTable> {
    match name.trim().to_lowercase().as_str() {
        "success-value" | "success_value" | "sv" => Some(success_value()),
        "morale" => Some(morale()),
        "fear" => Some(fear()),
        "fate" => Some(fate()),
        "injury" => Some(injury_severity()),
        _ => None,
    }
}

fn stars(n: i32) -> String {
    "★".repeat(n.max(0) as usize)
}

/// Quality of a test result by success value.
///
/// Values above 4 earn one star per point, up to five.
pub fn success_value() -> DescriptionTable {
    fn bonus_label(ctx: &LookupContext) -> String {
        format!("{} Bonus Value", stars(ctx.success_value - 4))
    }
    fn bonus_result(ctx: &LookupContext) -> i32 {
        ctx.success_value - 4
    }

    DescriptionTable::new(
        "success-value",
        LookupKey::SuccessValue,
        vec![
            Descriptor::new(0, "No Value", "Test fails to produce a usable result", false),
            Descriptor::new(
                2,
                "Little Value",
                "Test produces a limited or flawed result",
                false,
            ),
            Descriptor::new(4, "Base Value", "Test produces an average result", true),
            Descriptor::new(
                8,
                Detail::<String>::Computed(bonus_label),
                "Test produces a superior result",
                true,
            )
            .with_result(Detail::<i32>::Computed(bonus_result)),
            Descriptor::new(
                999,
                format!("{} Bonus Value", stars(5)).as_str(),
                "Test produces a superior result",
                true,
            )
            .with_result(5),
        ],
    )
}

/// Morale check outcomes by success level.
pub fn morale() -> DescriptionTable {
    DescriptionTable::new(
        "morale",
        LookupKey::SuccessLevel,
        vec![
            Descriptor::new(SuccessLevel::CriticalFailure.value(), "Routed", "", false)
                .with_limited(LimitedDescriptor::new(
                    [0],
                    "Catatonic",
                    "Suffers 2 PSY and is unaware and unable to move, act, or defend.",
                    false,
                ))
                .with_limited(LimitedDescriptor::new(
                    [5],
                    "Routed",
                    "Suffers 1 PSY and selects flee action at full move each round.",
                    false,
                )),
            Descriptor::new(
                SuccessLevel::MarginalFailure.value(),
                "Withdrawing",
                "Selects Move action each round to retreat from combat at 1/2 move or more.",
                false,
            ),
            Descriptor::new(
                SuccessLevel::MarginalSuccess.value(),
                "Steady",
                "Character may take any action.",
                true,
            ),
            Descriptor::new(
                SuccessLevel::CriticalSuccess.value(),
                "Brave",
                "Character may take any action and receives a +20 bonus to all Morale and Fear rolls for 5 minutes.",
                true,
            ),
        ],
    )
}

/// Fear check outcomes by success level.
pub fn fear() -> DescriptionTable {
    DescriptionTable::new(
        "fear",
        LookupKey::SuccessLevel,
        vec![
            Descriptor::new(SuccessLevel::CriticalFailure.value(), "Terrified", "", false)
                .with_limited(LimitedDescriptor::new(
                    [0],
                    "Catatonic",
                    "Suffers 2 PSY and is unaware and unable to move, act, or defend.",
                    false,
                ))
                .with_limited(LimitedDescriptor::new(
                    [5],
                    "Terrified",
                    "Suffers 1 PSY and only able to Block or Dodge in defense; on next turn must flee at full move.",
                    false,
                )),
            Descriptor::new(
                SuccessLevel::MarginalFailure.value(),
                "Afraid",
                "Only able to Block or Dodge in defense; on next turn must flee at 1/2 move or more.",
                false,
            ),
            Descriptor::new(
                SuccessLevel::MarginalSuccess.value(),
                "Steady",
                "Character may act unaffected by this source of fear.",
                true,
            ),
            Descriptor::new(
                SuccessLevel::CriticalSuccess.value(),
                "Brave",
                "Character may act unaffected by this source of fear and receives a +20 bonus to all Fear and Morale rolls for 5 minutes.",
                true,
            ),
        ],
    )
}

/// Fate check outcomes by success level.
pub fn fate() -> DescriptionTable {
    DescriptionTable::new(
        "fate",
        LookupKey::SuccessLevel,
        vec![
            Descriptor::new(
                SuccessLevel::MarginalFailure.value(),
                "No Fate",
                "Fate test fails, no fate is granted",
                false,
            ),
            Descriptor::new(999, "Fate Succeeded", "Fate test succeeds", true).with_result(1),
        ],
    )
}

/// Injury severity codes by injury level: "0", "M1", "S2", "S3", "G4", ...
pub fn injury_severity() -> DescriptionTable {
    fn serious(ctx: &LookupContext) -> String {
        format!("S{}", ctx.value)
    }
    fn grievous(ctx: &LookupContext) -> String {
        format!("G{}", ctx.value)
    }
    fn level(ctx: &LookupContext) -> i32 {
        ctx.value
    }

    DescriptionTable::new(
        "injury",
        LookupKey::Value,
        vec![
            Descriptor::new(0, "0", "No injury", true),
            Descriptor::new(1, "M1", "Minor injury", true).with_result(1),
            Descriptor::new(3, Detail::<String>::Computed(serious), "Serious injury", false)
                .with_result(Detail::<i32>::Computed(level)),
            Descriptor::new(i32::MAX, Detail::<String>::Computed(grievous), "Grievous injury", false)
                .with_result(Detail::<i32>::Computed(level)),
        ],
    )
}
