use std::sync::Arc;

use bevy::prelude::*;
use serde::Serialize;

use crate::galaxy::filter::FilterCriteria;
use crate::galaxy::item::VisualizationItem;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Current word collection. Replaced wholesale on every refresh.
#[derive(Resource, Debug, Default)]
pub struct GalaxyData {
    pub items: Vec<Arc<VisualizationItem>>,
    /// Bumped on each refresh; zero until the first collection arrives.
    pub generation: u64,
}

impl GalaxyData {
    pub fn replace(&mut self, items: Vec<VisualizationItem>) {
        self.items = items.into_iter().map(Arc::new).collect();
        self.generation += 1;
    }
}

#[derive(Resource, Debug, Default)]
pub struct GalaxyFilters {
    pub criteria: FilterCriteria,
}

/// Outcome of the most recent label sync pass.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelSyncStats {
    pub visible: usize,
    pub total: usize,
    pub generation: u64,
}

#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct LabelStatsText;

