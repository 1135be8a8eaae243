//! The operations a host uses to drive the galaxy.
//!
//! These are the only paths that mutate the word collection, the filter
//! criteria, the camera animation or the selection callback. The JSON-RPC
//! bridge, the snapshot loader and the native shortcuts all go through them.

use bevy::prelude::*;

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::camera::reset_animation::CameraAnimator;
use crate::engine::core::app_state::{GalaxyData, GalaxyFilters};
use crate::galaxy::filter::FilterCriteria;
use crate::galaxy::item::VisualizationItem;
use crate::tools::selection::SelectionDispatcher;

pub trait GalaxyControl {
    /// Replace the whole collection; labels are rebuilt on the next frame.
    fn update_data(&mut self, items: Vec<VisualizationItem>);

    /// Replace every filter field at once.
    fn apply_filters(&mut self, criteria: FilterCriteria);

    /// Set or clear the component drill-down, keeping the other criteria.
    fn set_component_filter(&mut self, component: Option<String>);

    /// Fly back to the home pose. Restarts if a reset is already running.
    fn request_camera_reset(&mut self);

    fn set_on_select<F>(&mut self, callback: F)
    where
        F: Fn(&VisualizationItem) + Send + Sync + 'static;

    fn filter_criteria(&self) -> &FilterCriteria;
}

impl GalaxyControl for World {
    fn update_data(&mut self, items: Vec<VisualizationItem>) {
        let mut data = self.resource_mut::<GalaxyData>();
        data.replace(items);
        info!(
            "Galaxy data updated: {} words (generation {})",
            data.items.len(),
            data.generation
        );
    }

    fn apply_filters(&mut self, criteria: FilterCriteria) {
        debug!("Applying filters: {:?}", criteria);
        self.resource_mut::<GalaxyFilters>().criteria = criteria;
    }

    fn set_component_filter(&mut self, component: Option<String>) {
        let component = component.filter(|token| !token.is_empty());
        info!("Component filter: {:?}", component);
        self.resource_mut::<GalaxyFilters>().criteria.component = component;
    }

    fn request_camera_reset(&mut self) {
        self.resource_scope(|world, mut animator: Mut<CameraAnimator>| {
            let mut orbit = world.resource_mut::<OrbitCamera>();
            animator.request_reset(&mut orbit);
        });
        info!("Camera reset requested");
    }

    fn set_on_select<F>(&mut self, callback: F)
    where
        F: Fn(&VisualizationItem) + Send + Sync + 'static,
    {
        self.resource_mut::<SelectionDispatcher>()
            .set_callback(Box::new(callback));
    }

    fn filter_criteria(&self) -> &FilterCriteria {
        &self.resource::<GalaxyFilters>().criteria
    }
}

impl GalaxyControl for App {
    fn update_data(&mut self, items: Vec<VisualizationItem>) {
        self.world_mut().update_data(items);
    }

    fn apply_filters(&mut self, criteria: FilterCriteria) {
        self.world_mut().apply_filters(criteria);
    }

    fn set_component_filter(&mut self, component: Option<String>) {
        self.world_mut().set_component_filter(component);
    }

    fn request_camera_reset(&mut self) {
        self.world_mut().request_camera_reset();
    }

    fn set_on_select<F>(&mut self, callback: F)
    where
        F: Fn(&VisualizationItem) + Send + Sync + 'static,
    {
        self.world_mut().set_on_select(callback);
    }

    fn filter_criteria(&self) -> &FilterCriteria {
        self.world().filter_criteria()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::engine::camera::reset_animation::CameraAnimation;
    use crate::engine::core::app_setup::insert_galaxy_resources;
    use crate::engine::core::settings::GalaxySettings;
    use crate::galaxy::filter::SrsBucket;

    fn control_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        insert_galaxy_resources(&mut app, GalaxySettings::default());
        app
    }

    #[test]
    fn update_data_bumps_generation() {
        let mut app = control_app();
        app.update_data(vec![VisualizationItem::new(1, "a", "b")]);
        app.update_data(vec![
            VisualizationItem::new(2, "c", "d"),
            VisualizationItem::new(3, "e", "f"),
        ]);

        let data = app.world().resource::<GalaxyData>();
        assert_eq!(data.generation, 2);
        assert_eq!(
            data.items.iter().map(|item| item.id).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn component_filter_sets_and_clears() {
        let mut app = control_app();
        app.set_component_filter(Some("ก".to_string()));
        assert_eq!(app.filter_criteria().component.as_deref(), Some("ก"));

        app.set_component_filter(Some(String::new()));
        assert_eq!(app.filter_criteria().component, None);

        app.apply_filters(FilterCriteria {
            srs_level: SrsBucket::SevenPlus,
            ..default()
        });
        assert_eq!(app.filter_criteria().srs_level, SrsBucket::SevenPlus);
    }

    #[test]
    fn component_filter_persists_across_data_refresh() {
        let mut app = control_app();
        app.set_component_filter(Some("เรียน".to_string()));
        let component = app.filter_criteria().component.clone();
        app.apply_filters(FilterCriteria {
            srs_level: SrsBucket::OneToThree,
            component,
            ..default()
        });

        app.update_data(vec![VisualizationItem::new(1, "โรงเรียน", "école")]);
        app.update();
        app.update_data(vec![VisualizationItem::new(2, "เรียน", "étudier")]);
        app.update();

        let criteria = app.filter_criteria();
        assert_eq!(criteria.component.as_deref(), Some("เรียน"));
        assert_eq!(criteria.srs_level, SrsBucket::OneToThree);
    }

    #[test]
    fn camera_reset_starts_animation() {
        let mut app = control_app();
        app.request_camera_reset();

        let animator = app.world().resource::<CameraAnimator>();
        assert!(matches!(
            animator.state(),
            CameraAnimation::Resetting { progress, .. } if progress == 0.0
        ));
        assert!(!app.world().resource::<OrbitCamera>().auto_rotate);
    }

    #[test]
    fn on_select_is_stored() {
        let mut app = control_app();
        let hits = Arc::new(Mutex::new(0));
        let counter = hits.clone();
        app.set_on_select(move |_item: &VisualizationItem| {
            *counter.lock().unwrap() += 1;
        });

        let dispatcher = app.world().resource::<SelectionDispatcher>();
        assert!(dispatcher.dispatch(&VisualizationItem::new(1, "a", "b")));
        assert_eq!(*hits.lock().unwrap(), 1);
    }
}
