//! Ability system: ids, effect descriptors, and resolution.
//!
//! ## Key Types
//!
//! - [`AbilityId`]: Stable identifier printed on cards
//! - [`AbilityEffect`]: Kind, magnitude, target scope and trigger
//! - [`AbilityResolver`]: Registry plus pure execution
//! - [`EffectOutcome`]: Typed result, one variant per effect kind
//! - [`DamageBreakdown`]: The armor, shield, health mitigation rule

pub mod ability;
pub mod damage;
pub mod effect;
pub mod resolver;

pub use ability::AbilityId;
pub use damage::DamageBreakdown;
pub use effect::{AbilityEffect, EffectKind, TargetScope, TriggerCondition};
pub use resolver::{
    AbilityResolver, EffectOutcome, ExecutionContext, ExecutionFailure, ExecutionResult,
    ResolvedTarget,
};
