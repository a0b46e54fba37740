#[path = "property/transition_rules.rs"]
mod transition_rules;

#[path = "property/decay_targets.rs"]
mod decay_targets;

#[path = "property/count_monotonic.rs"]
mod count_monotonic;
