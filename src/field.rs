use crate::config::FieldOptions;
use crate::constants::*;
use glam::{Mat4, Quat, Vec2, Vec3};
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

/// Visible extent of the z=0 world plane for the fixed camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneSize {
    pub width: f32,
    pub height: f32,
}

impl PlaneSize {
    /// Derive the plane from viewport pixel dimensions. Returns `None` for
    /// a zero-area viewport so degenerate frustum values never reach the
    /// update loop.
    pub fn from_viewport(px_width: f32, px_height: f32) -> Option<Self> {
        if !(px_width > 0.0) || !(px_height > 0.0) {
            return None;
        }
        let aspect = px_width / px_height;
        let height = 2.0 * (CAMERA_FOV_DEG.to_radians() / 2.0).tan() * CAMERA_Z;
        let width = height * aspect;
        (width.is_finite() && height.is_finite()).then_some(Self { width, height })
    }

    /// Square plane used when seeding happens before the container has
    /// been laid out (zero-area viewport at construction).
    pub fn fallback() -> Self {
        let height = 2.0 * (CAMERA_FOV_DEG.to_radians() / 2.0).tan() * CAMERA_Z;
        Self {
            width: height,
            height,
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// One independently simulated particle.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    /// Monotonically increasing driver of the periodic motion.
    pub phase: f32,
    /// Per-particle phase increment, fixed at creation.
    pub speed: f32,
    /// Seeded rest position; never changes after creation.
    pub rest: Vec3,
    /// Rendered position, smoothed toward the frame target.
    pub current: Vec3,
    /// Fixed per-particle ring radius offset in [-1, 1).
    pub radius_jitter: f32,
}

/// Deterministic idle sweep followed when the pointer has been still.
#[inline]
pub fn sweep_destination(time_sec: f32, plane: PlaneSize) -> Vec2 {
    Vec2::new(
        (time_sec * SWEEP_X_RATE).sin() * plane.width / SWEEP_EXTENT_DIVISOR,
        (time_sec * SWEEP_Y_RATE).cos() * plane.height / SWEEP_EXTENT_DIVISOR,
    )
}

/// The particle swarm plus its per-frame transform buffer.
///
/// Fully deterministic given the seeding RNG and the per-frame inputs, and
/// free of any rendering dependency: `step` writes one matrix per particle
/// into `transforms`, which the presentation layer uploads as instance
/// data. Tests inspect the buffer directly.
pub struct ParticleField {
    opts: FieldOptions,
    pub particles: Vec<Particle>,
    virtual_target: Vec2,
    transforms: Vec<Mat4>,
}

impl ParticleField {
    pub fn new(opts: FieldOptions, plane: PlaneSize, rng: &mut impl Rng) -> Self {
        let particles = seed_particles(opts.count, plane, rng);
        let transforms = vec![Mat4::IDENTITY; opts.count];
        Self {
            opts,
            particles,
            virtual_target: Vec2::ZERO,
            transforms,
        }
    }

    /// Re-run seeding in place (used when the instance mesh is swapped).
    /// Count is fixed for the life of the instance.
    pub fn reseed(&mut self, plane: PlaneSize, rng: &mut impl Rng) {
        self.particles = seed_particles(self.opts.count, plane, rng);
    }

    /// Record a base-mesh swap. Everything else in the options stays fixed
    /// for the life of the instance.
    pub fn set_shape(&mut self, shape: crate::config::ParticleShape) {
        self.opts.shape = shape;
    }

    pub fn options(&self) -> &FieldOptions {
        &self.opts
    }

    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    pub fn virtual_target(&self) -> Vec2 {
        self.virtual_target
    }

    /// Advance the whole field by one frame and rebuild the transform
    /// buffer. Smoothing uses fixed per-frame factors rather than
    /// dt-normalized decay; `time_sec` only drives the periodic terms.
    pub fn step(&mut self, plane: PlaneSize, pointer_ndc: Vec2, idle: bool, time_sec: f32) {
        let dest = if idle {
            sweep_destination(time_sec, plane)
        } else {
            pointer_ndc * plane.half_extents()
        };
        self.virtual_target += (dest - self.virtual_target) * VIRTUAL_SMOOTH_FACTOR;

        let o = &self.opts;
        let virtual_target = self.virtual_target;
        let global_rotation = time_sec * o.rotation_speed;

        for (p, out) in self.particles.iter_mut().zip(self.transforms.iter_mut()) {
            p.phase += p.speed / 2.0;

            // Project the target into this particle's depth plane.
            let pf = 1.0 - p.rest.z / PROJECTION_DEPTH;
            let projected = virtual_target * pf;

            let d = p.rest.truncate() - projected;
            let dist = d.length();

            let mut target = Vec3::new(p.rest.x, p.rest.y, p.rest.z * o.depth_factor);
            if dist < o.magnet_radius {
                let angle = d.y.atan2(d.x) + global_rotation;
                let wave = (p.phase * o.wave_speed + angle).sin() * 0.5 * o.wave_amplitude;
                let deviation =
                    p.radius_jitter * (JITTER_GAIN / (o.field_strength + FIELD_STRENGTH_BIAS));
                let ring_radius = o.ring_radius + wave + deviation;
                target = Vec3::new(
                    projected.x + ring_radius * angle.cos(),
                    projected.y + ring_radius * angle.sin(),
                    p.rest.z * o.depth_factor + p.phase.sin() * o.wave_amplitude * o.depth_factor,
                );
            }

            p.current += (target - p.current) * o.lerp_speed;

            let rotation = face_target(p.current, projected);

            let planar_dist = p.current.truncate().distance(projected);
            let ring_err = (planar_dist - o.ring_radius).abs();
            let falloff = (1.0 - ring_err / RING_FALLOFF_DIVISOR)
                .clamp(SCALE_FACTOR_MIN, SCALE_FACTOR_MAX);
            let pulse = PULSE_BASE + (p.phase * o.pulse_speed).sin() * PULSE_SPAN * o.particle_variance;
            let scale = falloff * pulse * o.particle_size;

            *out = Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, p.current);
        }
    }
}

/// Orient a particle toward the projected target within its own depth
/// plane, then roll 90 degrees about local X so the base mesh's long axis
/// (+Y) lines up radially.
#[inline]
fn face_target(current: Vec3, projected: Vec2) -> Quat {
    let dir = Vec3::new(projected.x - current.x, projected.y - current.y, 0.0);
    let facing = if dir.length_squared() > 1e-12 {
        Quat::from_rotation_arc(Vec3::Z, dir.normalize())
    } else {
        Quat::IDENTITY
    };
    facing * Quat::from_rotation_x(FRAC_PI_2)
}

fn seed_particles(count: usize, plane: PlaneSize, rng: &mut impl Rng) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let rest = Vec3::new(
                (rng.gen::<f32>() - 0.5) * plane.width,
                (rng.gen::<f32>() - 0.5) * plane.height,
                (rng.gen::<f32>() - 0.5) * (DEPTH_SPREAD * 2.0),
            );
            Particle {
                phase: rng.gen::<f32>() * PHASE_MAX,
                speed: SPEED_BASE + rng.gen::<f32>() * SPEED_SPAN,
                rest,
                current: rest,
                radius_jitter: (rng.gen::<f32>() - 0.5) * 2.0,
            }
        })
        .collect()
}
