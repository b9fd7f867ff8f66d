/// Base mesh used for every instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ParticleShape {
    #[default]
    Capsule,
    Sphere,
    Box,
    Tetrahedron,
}

impl ParticleShape {
    /// Case-insensitive lookup; unknown names fall back to the capsule.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "sphere" => Self::Sphere,
            "box" => Self::Box,
            "tetrahedron" => Self::Tetrahedron,
            _ => Self::Capsule,
        }
    }
}

/// Resolved field options. Immutable once the instance is constructed.
///
/// No range validation beyond types: out-of-range values (negative radii,
/// zero count) produce degenerate but non-crashing output.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldOptions {
    pub count: usize,
    pub magnet_radius: f32,
    pub ring_radius: f32,
    pub wave_speed: f32,
    pub wave_amplitude: f32,
    pub particle_size: f32,
    pub lerp_speed: f32,
    pub color: String,
    pub auto_animate: bool,
    pub particle_variance: f32,
    pub rotation_speed: f32,
    pub depth_factor: f32,
    pub pulse_speed: f32,
    pub shape: ParticleShape,
    pub field_strength: f32,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            count: 300,
            magnet_radius: 10.0,
            ring_radius: 10.0,
            wave_speed: 0.4,
            wave_amplitude: 1.0,
            particle_size: 2.0,
            lerp_speed: 0.1,
            color: "#FF9FFC".to_string(),
            auto_animate: false,
            particle_variance: 1.0,
            rotation_speed: 0.0,
            depth_factor: 1.0,
            pulse_speed: 3.0,
            shape: ParticleShape::Capsule,
            field_strength: 10.0,
        }
    }
}

impl FieldOptions {
    /// Merge caller-supplied overrides onto the defaults.
    pub fn resolved(patch: FieldOptionsPatch) -> Self {
        let mut opts = Self::default();
        patch.apply_to(&mut opts);
        opts
    }
}

/// Caller-supplied partial options; `None` keeps the default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldOptionsPatch {
    pub count: Option<usize>,
    pub magnet_radius: Option<f32>,
    pub ring_radius: Option<f32>,
    pub wave_speed: Option<f32>,
    pub wave_amplitude: Option<f32>,
    pub particle_size: Option<f32>,
    pub lerp_speed: Option<f32>,
    pub color: Option<String>,
    pub auto_animate: Option<bool>,
    pub particle_variance: Option<f32>,
    pub rotation_speed: Option<f32>,
    pub depth_factor: Option<f32>,
    pub pulse_speed: Option<f32>,
    pub shape: Option<ParticleShape>,
    pub field_strength: Option<f32>,
}

impl FieldOptionsPatch {
    pub fn apply_to(self, opts: &mut FieldOptions) {
        if let Some(v) = self.count {
            opts.count = v;
        }
        if let Some(v) = self.magnet_radius {
            opts.magnet_radius = v;
        }
        if let Some(v) = self.ring_radius {
            opts.ring_radius = v;
        }
        if let Some(v) = self.wave_speed {
            opts.wave_speed = v;
        }
        if let Some(v) = self.wave_amplitude {
            opts.wave_amplitude = v;
        }
        if let Some(v) = self.particle_size {
            opts.particle_size = v;
        }
        if let Some(v) = self.lerp_speed {
            opts.lerp_speed = v;
        }
        if let Some(v) = self.color {
            opts.color = v;
        }
        if let Some(v) = self.auto_animate {
            opts.auto_animate = v;
        }
        if let Some(v) = self.particle_variance {
            opts.particle_variance = v;
        }
        if let Some(v) = self.rotation_speed {
            opts.rotation_speed = v;
        }
        if let Some(v) = self.depth_factor {
            opts.depth_factor = v;
        }
        if let Some(v) = self.pulse_speed {
            opts.pulse_speed = v;
        }
        if let Some(v) = self.shape {
            opts.shape = v;
        }
        if let Some(v) = self.field_strength {
            opts.field_strength = v;
        }
    }
}

/// Parse "#RRGGBB", "RRGGBB" or "#RGB" into linear-ish RGB in [0, 1].
/// Returns `None` on malformed input so the caller can fall back.
pub fn parse_hex_color(s: &str) -> Option<[f32; 3]> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !hex.is_ascii() {
        return None;
    }
    let (r, g, b) = match hex.len() {
        6 => (
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        ),
        3 => {
            let d = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            (d(0)?, d(1)?, d(2)?)
        }
        _ => return None,
    };
    Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}
