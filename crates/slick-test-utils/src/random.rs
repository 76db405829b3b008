//! Seeded random substances and releases for stress scenarios.
//!
//! Every generator takes an explicit seed and uses `ChaCha8Rng`, so a
//! failing scenario reproduces from its seed alone.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slick_core::{Component, ComponentKind, SpillId, Substance, SubstanceId};
use slick_elements::Release;

const KINDS: [ComponentKind; 4] = [
    ComponentKind::Saturates,
    ComponentKind::Aromatics,
    ComponentKind::Resins,
    ComponentKind::Asphaltenes,
];

const INERT_KINDS: [ComponentKind; 3] = [
    ComponentKind::Saturates,
    ComponentKind::Resins,
    ComponentKind::Asphaltenes,
];

/// A valid, buoyant substance with 2 to 8 components.
///
/// The first component is aromatic and the second is not, so every
/// substance can dissolve. Aromatics are drawn from the light range
/// (MW 78–300, benzene to four-ring PAHs); every component is lighter
/// than sea water.
pub fn random_substance(seed: u64) -> Substance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = rng.random_range(2..=8);
    let mut components: Vec<Component> = (0..n)
        .map(|i| {
            let kind = match i {
                0 => ComponentKind::Aromatics,
                1 => INERT_KINDS[rng.random_range(0..INERT_KINDS.len())],
                _ => KINDS[rng.random_range(0..KINDS.len())],
            };
            let molecular_weight = if kind.is_aromatic() {
                rng.random_range(78.0..300.0)
            } else {
                rng.random_range(150.0..800.0)
            };
            Component::new(
                kind,
                molecular_weight,
                rng.random_range(750.0..1000.0),
                rng.random_range(0.05..1.0),
            )
        })
        .collect();
    let sum: f64 = components.iter().map(|c| c.mass_fraction).sum();
    for c in &mut components {
        c.mass_fraction /= sum;
    }
    Substance::new(format!("random oil {seed}"), components)
}

/// `count` releases of `substance` with random sizes and droplet diameters.
pub fn random_releases(seed: u64, substance: SubstanceId, count: usize) -> Vec<Release> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| Release {
            substance,
            spill: SpillId(i as u32),
            num_elements: rng.random_range(1..=20),
            mass: rng.random_range(1.0..10_000.0),
            droplet_diameter: rng.random_range(1e-5..5e-4),
            viscosity: rng.random_range(1e-6..1e-3),
        })
        .collect()
}
