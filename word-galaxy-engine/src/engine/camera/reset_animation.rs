use bevy::prelude::*;

use super::orbit_camera::{CameraPose, OrbitCamera};

/// Emitted on the frame the camera lands exactly on its home pose.
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraResetCompleted;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraAnimation {
    Idle,
    Resetting {
        from_position: Vec3,
        from_target: Vec3,
        progress: f32,
    },
}

/// Drives the eased return to the home pose.
#[derive(Resource, Debug, Clone)]
pub struct CameraAnimator {
    home: CameraPose,
    step: f32,
    state: CameraAnimation,
}

impl CameraAnimator {
    pub fn new(home: CameraPose, step: f32) -> Self {
        Self {
            home,
            step,
            state: CameraAnimation::Idle,
        }
    }

    pub fn state(&self) -> CameraAnimation {
        self.state
    }

    pub fn home(&self) -> CameraPose {
        self.home
    }

    pub fn is_resetting(&self) -> bool {
        matches!(self.state, CameraAnimation::Resetting { .. })
    }

    /// Start (or restart) the animation from wherever the camera currently is.
    pub fn request_reset(&mut self, camera: &mut OrbitCamera) {
        self.state = CameraAnimation::Resetting {
            from_position: camera.pose.position,
            from_target: camera.pose.target,
            progress: 0.0,
        };
        camera.auto_rotate = false;
        camera.halt();
    }

    /// Advance one tick. Returns `true` on the tick the animation completes.
    pub fn advance(&mut self, camera: &mut OrbitCamera) -> bool {
        let CameraAnimation::Resetting {
            from_position,
            from_target,
            progress,
        } = self.state
        else {
            return false;
        };

        let progress = progress + self.step;
        let t = progress.min(1.0);

        if t >= 1.0 {
            camera.pose = self.home;
            camera.auto_rotate = true;
            self.state = CameraAnimation::Idle;
            return true;
        }

        let from = CameraPose {
            position: from_position,
            target: from_target,
        };
        camera.pose = from.lerp(&self.home, ease_out_quad(t));
        self.state = CameraAnimation::Resetting {
            from_position,
            from_target,
            progress,
        };
        false
    }
}

/// Quadratic ease-out: fast start, gentle arrival.
pub fn ease_out_quad(t: f32) -> f32 {
    t * (2.0 - t)
}

pub fn camera_resetting(animator: Res<CameraAnimator>) -> bool {
    animator.is_resetting()
}

pub fn advance_camera_reset(
    mut animator: ResMut<CameraAnimator>,
    mut orbit: ResMut<OrbitCamera>,
    mut completed: EventWriter<CameraResetCompleted>,
) {
    if animator.advance(&mut orbit) {
        info!("Camera reset complete");
        completed.write(CameraResetCompleted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::core::settings::OrbitSettings;

    fn home() -> CameraPose {
        CameraPose {
            position: Vec3::new(0.0, 200.0, 900.0),
            target: Vec3::ZERO,
        }
    }

    fn displaced_camera() -> OrbitCamera {
        OrbitCamera::new(
            CameraPose {
                position: Vec3::new(-700.0, 40.0, 120.0),
                target: Vec3::new(30.0, -10.0, 5.0),
            },
            OrbitSettings::default(),
        )
    }

    #[test]
    fn reset_lands_exactly_on_home() {
        let mut animator = CameraAnimator::new(home(), 0.03);
        let mut camera = displaced_camera();
        animator.request_reset(&mut camera);
        assert!(!camera.auto_rotate);

        let mut ticks = 0;
        while !animator.advance(&mut camera) {
            ticks += 1;
            assert!(ticks < 100, "reset never finished");
        }

        // 0.03 per tick crosses 1.0 on the 34th tick
        assert_eq!(ticks + 1, 34);
        assert_eq!(camera.pose, home());
        assert!(camera.auto_rotate);
        assert_eq!(animator.state(), CameraAnimation::Idle);
    }

    #[test]
    fn idle_animator_leaves_camera_alone() {
        let mut animator = CameraAnimator::new(home(), 0.03);
        let mut camera = displaced_camera();
        let before = camera.pose;

        assert!(!animator.advance(&mut camera));
        assert_eq!(camera.pose, before);
    }

    #[test]
    fn easing_moves_most_of_the_way_early() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert!(ease_out_quad(0.5) > 0.5);
    }

    #[test]
    fn rerequest_restarts_from_current_pose() {
        let mut animator = CameraAnimator::new(home(), 0.03);
        let mut camera = displaced_camera();
        animator.request_reset(&mut camera);
        for _ in 0..10 {
            animator.advance(&mut camera);
        }
        let midway = camera.pose;

        animator.request_reset(&mut camera);
        match animator.state() {
            CameraAnimation::Resetting {
                from_position,
                from_target,
                progress,
            } => {
                assert_eq!(from_position, midway.position);
                assert_eq!(from_target, midway.target);
                assert_eq!(progress, 0.0);
            }
            CameraAnimation::Idle => panic!("expected a running reset"),
        }
    }

    #[derive(Resource, Default)]
    struct Completions(usize);

    fn count_completions(
        mut completed: EventReader<CameraResetCompleted>,
        mut completions: ResMut<Completions>,
    ) {
        completions.0 += completed.read().count();
    }

    #[test]
    fn completion_event_fires_once() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<CameraResetCompleted>()
            .init_resource::<Completions>()
            .insert_resource(OrbitCamera::new(
                displaced_camera().pose,
                OrbitSettings::default(),
            ))
            .insert_resource(CameraAnimator::new(home(), 0.5))
            .add_systems(
                Update,
                (
                    advance_camera_reset.run_if(camera_resetting),
                    count_completions,
                )
                    .chain(),
            );

        app.world_mut()
            .resource_scope(|world, mut animator: Mut<CameraAnimator>| {
                let mut orbit = world.resource_mut::<OrbitCamera>();
                animator.request_reset(&mut orbit);
            });

        for _ in 0..4 {
            app.update();
        }

        assert_eq!(app.world().resource::<Completions>().0, 1);
        assert_eq!(app.world().resource::<OrbitCamera>().pose, home());
    }
}
