use crate::config::NoiseConfig;
use crate::error::ConfigError;
use crate::grid::HeightGrid;
use crate::noise::{NoiseField, NOISE_MAX, NOISE_MIN};

/// Sums octaves of [NoiseField] into one normalized height field.
///
/// Octave `i` has lattice `scale * lacunarity^i` and weight `persistence^i`. Every octave is
/// seeded with the same noise seed.
#[derive(Debug, Clone)]
pub struct FractalComposer {
    layers: Vec<(NoiseField, f32)>,
    resolution: usize,
}

impl FractalComposer {
    pub fn new(config: &NoiseConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let layers = (0..config.octaves)
            .map(|octave| {
                let field = NoiseField::new(config.lattice(octave)?, config.resolution, config.seed)?
                    .with_burn(config.burn);

                Ok((field, config.weight(octave)))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            layers,
            resolution: config.resolution,
        })
    }

    /// The noise layers and their weights, coarsest first.
    pub fn layers(&self) -> &[(NoiseField, f32)] {
        &self.layers
    }

    pub fn compose(&self) -> HeightGrid {
        let mut sum = HeightGrid::new(self.resolution + 1);

        for (field, weight) in self.layers.iter() {
            let layer = field.generate();

            log::debug!(
                "noise layer: lattice {} weight {:.4}",
                field.lattice(),
                weight
            );

            for (s, h) in sum.values_mut().iter_mut().zip(layer.values()) {
                *s += weight * h;
            }
        }

        sum.normalize(NOISE_MIN, NOISE_MAX);
        sum
    }
}
