use nalgebra::Vector2;
use rand::Rng;
use serde::Serialize;

/// Cosmetic point effect spawned on kicks. Nothing in the simulation reads
/// particle state back; the renderer fades them by `life`.
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub life: f32,
}

#[derive(Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_burst<R: Rng>(
        &mut self,
        position: Vector2<f32>,
        count: usize,
        spread: f32,
        rng: &mut R,
    ) {
        for _ in 0..count {
            self.particles.push(Particle {
                position,
                velocity: Vector2::new(
                    rng.gen_range(-0.5..0.5) * spread,
                    rng.gen_range(-0.5..0.5) * spread,
                ),
                life: 1.0,
            });
        }
    }

    pub fn update(&mut self, decay: f32) {
        for particle in &mut self.particles {
            particle.position += particle.velocity;
            particle.life -= decay;
        }

        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_burst_spawns_at_origin_point() {
        let mut field = ParticleField::new();
        let mut rng = StdRng::seed_from_u64(1);

        field.spawn_burst(Vector2::new(10.0, 20.0), 5, 5.0, &mut rng);

        assert_eq!(field.len(), 5);
        assert!(field
            .as_slice()
            .iter()
            .all(|p| p.position == Vector2::new(10.0, 20.0) && p.life == 1.0));
    }

    #[test]
    fn test_particles_decay_and_prune() {
        let mut field = ParticleField::new();
        let mut rng = StdRng::seed_from_u64(1);
        field.spawn_burst(Vector2::zeros(), 3, 5.0, &mut rng);

        // Life 1.0, decay 0.25 (exact in binary): gone on the 4th update.
        for _ in 0..3 {
            field.update(0.25);
        }
        assert_eq!(field.len(), 3);

        field.update(0.25);
        assert!(field.is_empty());
    }
}
