//! Camera follow with a dead-zone and map clamp

use glam::{Mat4, Vec2, Vec3};

use super::state::ShipId;

/// Camera position, what it follows, and the derived view transform
#[derive(Debug, Clone)]
pub struct Camera {
    pub pos: Vec2,
    /// Handle to the followed ship; the camera never owns it
    pub target: Option<ShipId>,
    pub height: f32,
    view: Mat4,
}

impl Camera {
    pub fn new(height: f32, target: Option<ShipId>) -> Self {
        let mut camera = Self {
            pos: Vec2::ZERO,
            target,
            height,
            view: Mat4::IDENTITY,
        };
        camera.refresh_view();
        camera
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Shift the camera and rebuild the view transform
    pub fn move_by(&mut self, delta: Vec2) {
        self.pos += delta;
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        let eye = Vec3::new(self.pos.x, self.pos.y, self.height);
        let target = Vec3::new(self.pos.x, self.pos.y, 0.0);
        self.view = Mat4::look_at_rh(eye, target, Vec3::Y);
    }

    /// Follow `target_pos`; returns true if the camera moved
    pub fn follow(&mut self, target_pos: Vec2, viewport_half: Vec2, map_half: Vec2, edge_tolerance: f32) -> bool {
        let next = track(target_pos, self.pos, viewport_half, map_half, edge_tolerance);
        let delta = next - self.pos;
        if delta.length() > 0.0 {
            self.move_by(delta);
            return true;
        }
        false
    }
}

/// New camera position keeping `target` inside the dead-zone and the view on the map.
///
/// The dead-zone is the viewport shrunk by `edge_tolerance` on every side. The map
/// clamp runs second, so the map edge caps the dead-zone push.
pub fn track(target: Vec2, camera: Vec2, viewport_half: Vec2, map_half: Vec2, edge_tolerance: f32) -> Vec2 {
    let d = target - camera;
    let zone = viewport_half - Vec2::splat(edge_tolerance);
    let mut c = camera;

    if d.x - zone.x > 0.0 {
        c.x += d.x - zone.x;
    }
    if d.x + zone.x < 0.0 {
        c.x += d.x + zone.x;
    }
    if d.y - zone.y > 0.0 {
        c.y += d.y - zone.y;
    }
    if d.y + zone.y < 0.0 {
        c.y += d.y + zone.y;
    }

    if c.x + viewport_half.x > map_half.x {
        c.x = map_half.x - viewport_half.x;
    }
    if c.x - viewport_half.x < -map_half.x {
        c.x = -(map_half.x - viewport_half.x);
    }
    if c.y + viewport_half.y > map_half.y {
        c.y = map_half.y - viewport_half.y;
    }
    if c.y - viewport_half.y < -map_half.y {
        c.y = -(map_half.y - viewport_half.y);
    }

    c
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Vec2 = Vec2::new(320.0, 240.0);
    const MAP: Vec2 = Vec2::new(600.0, 400.0);

    #[test]
    fn test_push_then_clamp_to_map() {
        // push of 500 - (320 - 200) = 380, then capped at 600 - 320
        let c = track(Vec2::new(500.0, 0.0), Vec2::ZERO, VIEW, MAP, 200.0);
        assert_eq!(c, Vec2::new(280.0, 0.0));
    }

    #[test]
    fn test_push_without_clamp() {
        let c = track(Vec2::new(200.0, 0.0), Vec2::ZERO, VIEW, MAP, 200.0);
        assert_eq!(c, Vec2::new(80.0, 0.0));
    }

    #[test]
    fn test_dead_zone_holds_still() {
        let c = track(Vec2::new(100.0, -30.0), Vec2::ZERO, VIEW, MAP, 200.0);
        assert_eq!(c, Vec2::ZERO);
    }

    #[test]
    fn test_negative_direction() {
        let c = track(Vec2::new(0.0, -100.0), Vec2::ZERO, VIEW, MAP, 200.0);
        // zone.y = 40
        assert_eq!(c, Vec2::new(0.0, -60.0));
        let c = track(Vec2::new(0.0, -400.0), Vec2::ZERO, VIEW, MAP, 200.0);
        assert_eq!(c, Vec2::new(0.0, -160.0));
    }

    #[test]
    fn test_follow_only_moves_on_change() {
        let mut camera = Camera::new(9.0, None);
        let view = camera.view();
        assert!(!camera.follow(Vec2::new(10.0, 10.0), VIEW, MAP, 200.0));
        assert_eq!(camera.view(), view);
        assert!(camera.follow(Vec2::new(500.0, 0.0), VIEW, MAP, 200.0));
        assert_eq!(camera.pos, Vec2::new(280.0, 0.0));
        assert_ne!(camera.view(), view);
    }

    #[test]
    fn test_view_centers_camera() {
        let mut camera = Camera::new(9.0, None);
        camera.move_by(Vec2::new(50.0, -20.0));
        let p = camera.view().transform_point3(Vec3::new(50.0, -20.0, 0.0));
        assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4);
        assert!((p.z + 9.0).abs() < 1e-4);
    }
}
