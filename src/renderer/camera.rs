use glam::{Mat4, Vec2, Vec3};

pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 9.0, 18.0);
pub const INITIAL_TARGET: Vec3 = Vec3::ZERO;

/// Where the camera parks relative to a focused object.
pub const FOCUS_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 8.0);
/// Frames a focus transition takes (progress advances 0.05 per frame).
pub const FOCUS_FRAMES: u32 = 20;

const DAMPING_FACTOR: f32 = 0.05;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 500.0;

/// Linear camera/target transition towards a picked object.
#[derive(Clone, Copy, Debug)]
pub struct FocusAnimation {
    start_position: Vec3,
    end_position: Vec3,
    start_target: Vec3,
    end_target: Vec3,
    frame: u32,
}

impl FocusAnimation {
    pub fn new(from_position: Vec3, from_target: Vec3, object_position: Vec3) -> Self {
        Self {
            start_position: from_position,
            end_position: object_position + FOCUS_OFFSET,
            start_target: from_target,
            end_target: object_position,
            frame: 0,
        }
    }

    /// Advances one frame and returns the interpolated (position, target).
    pub fn step(&mut self) -> (Vec3, Vec3) {
        self.frame = (self.frame + 1).min(FOCUS_FRAMES);
        let progress = self.frame as f32 / FOCUS_FRAMES as f32;
        (
            self.start_position.lerp(self.end_position, progress),
            self.start_target.lerp(self.end_target, progress),
        )
    }

    pub fn finished(&self) -> bool {
        self.frame >= FOCUS_FRAMES
    }
}

/// Damped orbit camera around `target`.
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub orbital_distance: f32,

    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub mouse_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub zoom_speed: f32,

    pending_yaw: f32,
    pending_pitch: f32,
    pending_pan: Vec3,
    focus: Option<FocusAnimation>,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            position: INITIAL_POSITION,
            target: INITIAL_TARGET,
            yaw: 0.0,
            pitch: 0.0,
            orbital_distance: 0.0,

            fov: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,

            mouse_sensitivity: 0.005,
            pan_sensitivity: 0.0015,
            zoom_speed: 0.95,

            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_pan: Vec3::ZERO,
            focus: None,
        };
        camera.sync_from_position();
        camera
    }
}

impl Camera {
    pub fn front(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Left-drag rotation, applied gradually by [`Camera::update`].
    pub fn process_mouse_movement(&mut self, delta: Vec2) {
        self.pending_yaw += delta.x * self.mouse_sensitivity;
        self.pending_pitch += delta.y * self.mouse_sensitivity;
    }

    /// Right-drag pan in the view plane, scaled by distance.
    pub fn process_pan(&mut self, delta: Vec2) {
        let scale = self.orbital_distance * self.pan_sensitivity;
        self.pending_pan += (-self.right() * delta.x + self.up() * delta.y) * scale;
    }

    pub fn process_scroll(&mut self, delta: f32) {
        self.orbital_distance =
            (self.orbital_distance * self.zoom_speed.powf(delta)).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.update_orbital_position();
    }

    pub fn focus_on(&mut self, object_position: Vec3) {
        self.focus = Some(FocusAnimation::new(self.position, self.target, object_position));
    }

    pub fn is_focusing(&self) -> bool {
        self.focus.is_some()
    }

    pub fn reset(&mut self) {
        self.position = INITIAL_POSITION;
        self.target = INITIAL_TARGET;
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_pan = Vec3::ZERO;
        self.focus = None;
        self.sync_from_position();
    }

    /// Per-frame step: runs a pending focus transition, otherwise bleeds off
    /// damped orbit input.
    pub fn update(&mut self) {
        if let Some(focus) = &mut self.focus {
            let (position, target) = focus.step();
            let done = focus.finished();
            self.position = position;
            self.target = target;
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
            self.pending_pan = Vec3::ZERO;
            self.sync_from_position();
            if done {
                self.focus = None;
            }
            return;
        }

        let idle = self.pending_yaw.abs() < 1e-6
            && self.pending_pitch.abs() < 1e-6
            && self.pending_pan.length_squared() < 1e-12;
        if idle {
            return;
        }

        self.yaw += self.pending_yaw * DAMPING_FACTOR;
        self.pitch += self.pending_pitch * DAMPING_FACTOR;
        self.target += self.pending_pan * DAMPING_FACTOR;

        self.pending_yaw *= 1.0 - DAMPING_FACTOR;
        self.pending_pitch *= 1.0 - DAMPING_FACTOR;
        self.pending_pan *= 1.0 - DAMPING_FACTOR;

        let max_pitch = 89.0_f32.to_radians();
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);

        self.update_orbital_position();
    }

    fn sync_from_position(&mut self) {
        let offset = self.position - self.target;
        self.orbital_distance = offset.length().max(MIN_DISTANCE);
        let dir = offset.normalize_or_zero();
        self.yaw = dir.z.atan2(dir.x);
        self.pitch = dir.y.clamp(-1.0, 1.0).asin();
    }

    fn update_orbital_position(&mut self) {
        self.position = self.target
            + Vec3::new(
                self.orbital_distance * self.yaw.cos() * self.pitch.cos(),
                self.orbital_distance * self.pitch.sin(),
                self.orbital_distance * self.yaw.sin() * self.pitch.cos(),
            );
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _padding: f32,
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: camera.position.to_array(),
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a} != {b}");
    }

    #[test]
    fn test_default_matches_initial_view() {
        let camera = Camera::default();
        assert_eq!(camera.position, INITIAL_POSITION);
        assert_eq!(camera.target, INITIAL_TARGET);
        assert!((camera.orbital_distance - INITIAL_POSITION.length()).abs() < 1e-4);
    }

    #[test]
    fn test_spherical_roundtrip_is_stable() {
        let mut camera = Camera::default();
        camera.update_orbital_position();
        assert_vec_close(camera.position, INITIAL_POSITION);
    }

    #[test]
    fn test_focus_reaches_offset_after_twenty_frames() {
        let mut camera = Camera::default();
        let object = Vec3::new(7.0, -7.0, 0.0);
        camera.focus_on(object);

        for _ in 0..FOCUS_FRAMES - 1 {
            camera.update();
            assert!(camera.is_focusing());
        }
        camera.update();

        assert!(!camera.is_focusing());
        assert_vec_close(camera.position, object + FOCUS_OFFSET);
        assert_vec_close(camera.target, object);
    }

    #[test]
    fn test_focus_is_linear() {
        let mut camera = Camera::default();
        camera.focus_on(Vec3::new(0.0, 7.0, 0.0));
        for _ in 0..FOCUS_FRAMES / 2 {
            camera.update();
        }
        let halfway = INITIAL_POSITION.lerp(Vec3::new(0.0, 7.0, 8.0), 0.5);
        assert_vec_close(camera.position, halfway);
        assert_vec_close(camera.target, Vec3::new(0.0, 3.5, 0.0));
    }

    #[test]
    fn test_reset_cancels_focus() {
        let mut camera = Camera::default();
        camera.focus_on(Vec3::new(-7.0, 7.0, 0.0));
        camera.update();
        camera.process_scroll(3.0);
        camera.reset();
        assert!(!camera.is_focusing());
        assert_eq!(camera.position, INITIAL_POSITION);
        assert_eq!(camera.target, INITIAL_TARGET);
    }

    #[test]
    fn test_damped_rotation_keeps_distance() {
        let mut camera = Camera::default();
        let distance = camera.orbital_distance;
        camera.process_mouse_movement(Vec2::new(120.0, -40.0));
        for _ in 0..200 {
            camera.update();
        }
        assert!((camera.position.distance(camera.target) - distance).abs() < 1e-3);
        assert_ne!(camera.position, INITIAL_POSITION);
    }

    #[test]
    fn test_scroll_zooms_in_and_clamps() {
        let mut camera = Camera::default();
        let before = camera.orbital_distance;
        camera.process_scroll(1.0);
        assert!(camera.orbital_distance < before);
        camera.process_scroll(1000.0);
        assert_eq!(camera.orbital_distance, MIN_DISTANCE);
    }

    #[test]
    fn test_pan_moves_target() {
        let mut camera = Camera::default();
        camera.process_pan(Vec2::new(100.0, 0.0));
        for _ in 0..200 {
            camera.update();
        }
        assert!(camera.target.x < -0.5);
        assert!((camera.position - camera.target - INITIAL_POSITION).length() < 1e-3);
    }
}
