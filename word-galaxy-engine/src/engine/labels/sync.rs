use bevy::prelude::*;
use constants::render_settings::{LABEL_BACKGROUND_ALPHA, LABEL_PADDING_X, LABEL_PADDING_Y};

use super::{LabelStyle, OverlayLabel};
use crate::engine::core::app_state::{AppState, GalaxyData, GalaxyFilters, LabelSyncStats};
use crate::engine::core::frame::GalaxyFrameSet;
use crate::engine::core::settings::GalaxySettings;
use crate::galaxy::clusters::cluster_colour;
use crate::galaxy::filter::accepts_at;
use crate::galaxy::geometry::item_world_position;
use crate::tools::selection::{on_label_clicked, on_label_pressed};

/// Runs the overlay rebuild once the galaxy is up.
///
/// Both checks live in one condition so the change detector is only consulted
/// while running: a collection received during loading stays pending until then.
pub struct LabelSyncPlugin;

impl Plugin for LabelSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            sync_labels
                .in_set(GalaxyFrameSet::Sync)
                .run_if(in_state(AppState::Running).and(galaxy_inputs_changed)),
        );
    }
}

pub fn galaxy_inputs_changed(data: Res<GalaxyData>, filters: Res<GalaxyFilters>) -> bool {
    data.is_changed() || filters.is_changed()
}

/// Rebuild the overlay so it holds exactly the items accepted by the current criteria.
pub fn sync_labels(
    mut commands: Commands,
    data: Res<GalaxyData>,
    filters: Res<GalaxyFilters>,
    settings: Res<GalaxySettings>,
    style: Res<LabelStyle>,
    existing: Query<Entity, With<OverlayLabel>>,
    mut stats: ResMut<LabelSyncStats>,
) {
    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let now = chrono::Utc::now();
    let mut visible = 0;

    for (order, item) in data.items.iter().enumerate() {
        if !accepts_at(item, &filters.criteria, &now) {
            continue;
        }

        let colour = cluster_colour(item.cluster.as_ref());
        commands
            .spawn((
                OverlayLabel {
                    item: item.clone(),
                    world_position: item_world_position(item, settings.scale_factor),
                    colour,
                    opacity: 1.0,
                    generation: data.generation,
                    order,
                },
                Text::new(item.display_text.clone()),
                style.text_font(),
                TextColor(colour),
                BackgroundColor(colour.with_alpha(LABEL_BACKGROUND_ALPHA)),
                Node {
                    position_type: PositionType::Absolute,
                    padding: UiRect::axes(Val::Px(LABEL_PADDING_X), Val::Px(LABEL_PADDING_Y)),
                    ..default()
                },
                // Hidden until the first projection pass places it.
                Visibility::Hidden,
            ))
            .observe(on_label_pressed)
            .observe(on_label_clicked);
        visible += 1;
    }

    if visible == 0 && !data.items.is_empty() {
        warn!(
            "No words match the current filters ({} in collection)",
            data.items.len()
        );
    }

    *stats = LabelSyncStats {
        visible,
        total: data.items.len(),
        generation: data.generation,
    };
    debug!("Label sync: {}/{} visible", visible, data.items.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    use crate::galaxy::filter::{Choice, FilterCriteria};
    use crate::galaxy::item::{ClusterKey, VisualizationItem};

    fn sync_app_in(state: AppState) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_state(state)
            .init_resource::<GalaxyData>()
            .init_resource::<GalaxyFilters>()
            .init_resource::<LabelSyncStats>()
            .init_resource::<LabelStyle>()
            .insert_resource(GalaxySettings::default())
            .add_plugins(LabelSyncPlugin);
        app
    }

    fn sync_app() -> App {
        sync_app_in(AppState::Running)
    }

    fn word(id: u64, text: &str, cluster: &str, position: Vec3) -> VisualizationItem {
        let mut item = VisualizationItem::new(id, text, "");
        item.cluster = Some(ClusterKey::new(cluster));
        item.position = position;
        item
    }

    fn label_ids(app: &mut App) -> Vec<u64> {
        let mut ids: Vec<(usize, u64)> = app
            .world_mut()
            .query::<&OverlayLabel>()
            .iter(app.world())
            .map(|label| (label.order, label.item.id))
            .collect();
        ids.sort();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    #[test]
    fn labels_match_accepted_items() {
        let mut app = sync_app();
        app.world_mut().resource_mut::<GalaxyData>().replace(vec![
            word(1, "หนึ่ง", "1", Vec3::ZERO),
            word(2, "สอง", "2", Vec3::ZERO),
            word(3, "สาม", "1", Vec3::ZERO),
        ]);
        app.world_mut().resource_mut::<GalaxyFilters>().criteria = FilterCriteria {
            cluster: Choice::Only(ClusterKey::new("1")),
            ..default()
        };
        app.update();

        assert_eq!(label_ids(&mut app), vec![1, 3]);
        let stats = *app.world().resource::<LabelSyncStats>();
        assert_eq!(stats.visible, 2);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.generation, 1);
    }

    #[test]
    fn resync_is_idempotent() {
        let mut app = sync_app();
        app.world_mut().resource_mut::<GalaxyData>().replace(vec![
            word(1, "a", "1", Vec3::ZERO),
            word(2, "b", "2", Vec3::ZERO),
        ]);
        app.update();
        let first = label_ids(&mut app);

        // Same criteria applied again forces another full pass.
        app.world_mut().resource_mut::<GalaxyFilters>().set_changed();
        app.update();

        assert_eq!(label_ids(&mut app), first);
        assert_eq!(label_ids(&mut app).len(), 2);
    }

    #[test]
    fn filter_excluding_everything_leaves_empty_scene() {
        let mut app = sync_app();
        let items = (0..10)
            .map(|id| word(id, "คำ", "1", Vec3::ZERO))
            .collect::<Vec<_>>();
        app.world_mut().resource_mut::<GalaxyData>().replace(items);
        app.update();
        assert_eq!(label_ids(&mut app).len(), 10);

        app.world_mut().resource_mut::<GalaxyFilters>().criteria.search =
            "no such word".to_string();
        app.update();

        assert!(label_ids(&mut app).is_empty());
        assert_eq!(app.world().resource::<LabelSyncStats>().visible, 0);
        assert_eq!(app.world().resource::<LabelSyncStats>().total, 10);
    }

    #[test]
    fn labels_sit_at_scaled_positions() {
        let mut app = sync_app();
        let position = Vec3::new(0.5, -0.25, 1.0);
        app.world_mut()
            .resource_mut::<GalaxyData>()
            .replace(vec![word(9, "ไกล", "3", position)]);
        app.update();

        let scale = app.world().resource::<GalaxySettings>().scale_factor;
        let label = app
            .world_mut()
            .query::<&OverlayLabel>()
            .single(app.world())
            .unwrap()
            .clone();
        assert_eq!(label.world_position, position * scale);
    }

    #[test]
    fn refresh_replaces_stale_entities() {
        let mut app = sync_app();
        app.world_mut()
            .resource_mut::<GalaxyData>()
            .replace(vec![word(1, "a", "1", Vec3::ZERO)]);
        app.update();
        let before: Vec<Entity> = app
            .world_mut()
            .query_filtered::<Entity, With<OverlayLabel>>()
            .iter(app.world())
            .collect();

        app.world_mut()
            .resource_mut::<GalaxyData>()
            .replace(vec![word(1, "a", "1", Vec3::ZERO)]);
        app.update();

        let labels: Vec<(Entity, u64)> = app
            .world_mut()
            .query::<(Entity, &OverlayLabel)>()
            .iter(app.world())
            .map(|(entity, label)| (entity, label.generation))
            .collect();
        assert_eq!(labels.len(), 1);
        assert!(!before.contains(&labels[0].0));
        assert_eq!(labels[0].1, 2);
    }

    #[test]
    fn data_received_while_loading_syncs_on_running() {
        let mut app = sync_app_in(AppState::Loading);
        app.update();

        app.world_mut().resource_mut::<GalaxyData>().replace(vec![
            word(1, "แมว", "1", Vec3::ZERO),
            word(2, "หมา", "2", Vec3::ZERO),
        ]);
        for _ in 0..3 {
            app.update();
        }
        assert!(label_ids(&mut app).is_empty());

        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Running);
        app.update();
        app.update();

        assert_eq!(label_ids(&mut app), vec![1, 2]);
        assert_eq!(app.world().resource::<LabelSyncStats>().visible, 2);
    }
}
