use bevy::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use crate::api::GalaxyControl;

/// Native keyboard shortcuts: `R` flies home, `Escape` drops the component filter.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_galaxy_shortcuts(keyboard: Res<ButtonInput<KeyCode>>, mut commands: Commands) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        info!("Shortcut: camera reset");
        commands.queue(|world: &mut World| world.request_camera_reset());
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        info!("Shortcut: clear component filter");
        commands.queue(|world: &mut World| world.set_component_filter(None));
    }
}

/// Placeholder system for WASM builds where keyboard shortcuts are disabled.
#[cfg(target_arch = "wasm32")]
pub fn handle_galaxy_shortcuts() {
    // No keyboard shortcuts in WASM builds - the host page drives everything via RPC.
}
