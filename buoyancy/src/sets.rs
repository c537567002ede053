use bevy::prelude::*;

/// Ordering of the buoyancy systems.
///
/// `Init` runs in `Update` and attaches volume data to new hulls; `Apply`
/// runs in `PostUpdate` ahead of the rapier backend sync.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuoyancySet {
    Init,
    Apply,
}
