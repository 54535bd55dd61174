//! Event and observer to flip the walk/run preference.
//!
//! Emitting a [`SwitchRunEvent`] flips [`RunToggle`]. Nothing moves or
//! re-animates until the next controller update picks the new value up.
use crate::resources::runtoggle::RunToggle;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

/// Event used to flip the [`RunToggle`] resource.
///
/// This carries no data; the observer simply inverts the preference.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchRunEvent {}

/// Observer that flips the [`RunToggle`] resource.
pub fn switch_run_observer(_trigger: On<SwitchRunEvent>, mut run_toggle: ResMut<RunToggle>) {
    run_toggle.switch();
    debug!(
        "Run toggle {}",
        if run_toggle.enabled { "on" } else { "off" }
    );
}
