use std::sync::Arc;

use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;

use crate::engine::labels::OverlayLabel;
use crate::galaxy::item::VisualizationItem;

/// Host-supplied reaction to a word being picked.
pub type SelectCallback = Box<dyn Fn(&VisualizationItem) + Send + Sync>;

/// Holds the selection callback. Invoked synchronously on every activation.
#[derive(Resource, Default)]
pub struct SelectionDispatcher {
    on_select: Option<SelectCallback>,
}

impl SelectionDispatcher {
    pub fn set_callback(&mut self, callback: SelectCallback) {
        self.on_select = Some(callback);
    }

    /// Returns whether a callback was there to receive the item.
    pub fn dispatch(&self, item: &VisualizationItem) -> bool {
        match self.on_select {
            Some(ref callback) => {
                callback(item);
                true
            }
            None => false,
        }
    }
}

/// Set while a pointer press that started on a label is held, so the orbit
/// controls leave that drag alone.
#[derive(Resource, Debug, Default)]
pub struct LabelPointerGuard {
    pub engaged: bool,
}

/// Triggered on a label entity when the user activates it.
#[derive(Event, Debug, Clone, Copy)]
pub struct LabelActivated;

/// Buffered copy of each activation for systems such as the host bridge.
#[derive(Event, Debug, Clone)]
pub struct WordSelected {
    pub item: Arc<VisualizationItem>,
}

pub fn on_label_pressed(
    mut trigger: Trigger<Pointer<Pressed>>,
    mut guard: ResMut<LabelPointerGuard>,
) {
    trigger.propagate(false);
    guard.engaged = true;
}

pub fn on_label_clicked(mut trigger: Trigger<Pointer<Click>>, mut commands: Commands) {
    trigger.propagate(false);
    if trigger.event().button != PointerButton::Primary {
        return;
    }
    commands.trigger_targets(LabelActivated, trigger.target());
}

/// Route an activated label to the selection callback and the event stream.
pub fn dispatch_label_activation(
    trigger: Trigger<LabelActivated>,
    labels: Query<&OverlayLabel>,
    dispatcher: Res<SelectionDispatcher>,
    mut selected: EventWriter<WordSelected>,
) {
    let Ok(label) = labels.get(trigger.target()) else {
        return;
    };

    info!(
        "Word selected: {} ({})",
        label.item.display_text, label.item.id
    );
    if !dispatcher.dispatch(&label.item) {
        debug!("No selection callback registered");
    }
    selected.write(WordSelected {
        item: label.item.clone(),
    });
}
