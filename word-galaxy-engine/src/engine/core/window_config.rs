use bevy::prelude::*;
use bevy::window::PresentMode;

use crate::engine::core::settings::GalaxySettings;
use crate::error::{GalaxyError, GalaxyResult};

pub fn create_window_config(settings: &GalaxySettings) -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some(settings.canvas_selector.clone()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = settings;
        Window {
            title: "Word Galaxy".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

/// Fail early when there is nothing to draw into.
#[cfg(target_arch = "wasm32")]
pub fn check_surface(settings: &GalaxySettings) -> GalaxyResult<()> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| GalaxyError::SurfaceUnavailable("no browser document".to_string()))?;

    match document.query_selector(&settings.canvas_selector) {
        Ok(Some(_)) => Ok(()),
        _ => Err(GalaxyError::SurfaceUnavailable(format!(
            "canvas '{}' not found",
            settings.canvas_selector
        ))),
    }
}

/// Fail early when there is nothing to draw into.
#[cfg(all(not(target_arch = "wasm32"), target_os = "linux"))]
pub fn check_surface(_settings: &GalaxySettings) -> GalaxyResult<()> {
    let has_display = ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|value| !value.is_empty()));

    if has_display {
        Ok(())
    } else {
        Err(GalaxyError::SurfaceUnavailable(
            "neither DISPLAY nor WAYLAND_DISPLAY is set".to_string(),
        ))
    }
}

#[cfg(all(not(target_arch = "wasm32"), not(target_os = "linux")))]
pub fn check_surface(_settings: &GalaxySettings) -> GalaxyResult<()> {
    Ok(())
}
