//! Candidate offset generation for each brush shape
//!
//! Offsets are in working-plane coordinates, relative to the brush center.

use glam::Vec2;
use rand::Rng;
use sprinkler_config::BrushShape;

/// Unit direction of a line brush rotated `degrees` from the plane's first axis.
pub fn line_direction(degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// Draws random candidate offsets inside a brush shape
#[derive(Debug, Clone, Copy)]
pub struct SpatialSampler {
    shape: BrushShape,
    size: f32,
    direction: Vec2,
    /// Half-width of the band a line brush scatters across
    line_jitter: f32,
}

impl SpatialSampler {
    /// Create a sampler.
    ///
    /// `min_spacing` only matters for lines, where candidates are scattered
    /// up to half of it on either side of the line.
    pub fn new(shape: BrushShape, size: f32, line_angle_degrees: f32, min_spacing: f32) -> Self {
        Self {
            shape,
            size: size.max(0.0),
            direction: line_direction(line_angle_degrees),
            line_jitter: (min_spacing * 0.5).max(0.0),
        }
    }

    pub fn shape(&self) -> BrushShape {
        self.shape
    }

    /// Draw one offset.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec2 {
        match self.shape {
            BrushShape::Point => Vec2::ZERO,
            BrushShape::Circle => sample_unit_disc(rng) * self.size,
            BrushShape::Square => Vec2::new(
                rng.gen_range(-self.size..=self.size),
                rng.gen_range(-self.size..=self.size),
            ),
            BrushShape::Line => {
                let half_length = self.size * 0.5;
                let along = rng.gen_range(-half_length..=half_length);
                let across = rng.gen_range(-self.line_jitter..=self.line_jitter);
                self.direction * along + self.direction.perp() * across
            }
        }
    }

    /// Endless stream of offsets.
    pub fn iter<'a, R: Rng>(&'a self, rng: &'a mut R) -> impl Iterator<Item = Vec2> + 'a {
        std::iter::repeat_with(move || self.sample(&mut *rng))
    }
}

/// Uniform point in the unit disc by rejection from the enclosing square.
fn sample_unit_disc<R: Rng>(rng: &mut R) -> Vec2 {
    loop {
        let candidate = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}
