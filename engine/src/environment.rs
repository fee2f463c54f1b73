//! Stochastic wind and constant water current.
//!
//! Wind speed evolves as a bounded random walk over a 0.1 m/s grid with two
//! regimes: calm and gust. The current is a fixed vector. Seeded
//! construction makes the whole sequence reproducible.

use bevy_math::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::EnvConfig;
use crate::math::vector_of;

/// Wind regime. Gust timing only exists while a gust lasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gust {
    Calm,
    Gusting { started_at: f32, duration: f32 },
}

#[derive(Debug, Clone)]
pub struct Environment {
    config: EnvConfig,
    wind_speed: f32,
    gust: Gust,
    time: f32,
    rng: StdRng,
}

impl Environment {
    pub fn new(config: EnvConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic variant: the same seed replays the same wind sequence.
    pub fn with_seed(config: EnvConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EnvConfig, rng: StdRng) -> Self {
        let wind_speed = (config.wind_min_speed + config.wind_max_speed) / 2.0;
        Self {
            config,
            wind_speed,
            gust: Gust::Calm,
            time: 0.0,
            rng,
        }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Current wind speed scalar, m/s.
    pub fn wind_speed(&self) -> f32 {
        self.wind_speed
    }

    pub fn gust(&self) -> Gust {
        self.gust
    }

    pub fn is_gusting(&self) -> bool {
        matches!(self.gust, Gust::Gusting { .. })
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// True wind velocity in the world frame.
    pub fn wind_vector(&self) -> Vec2 {
        vector_of(self.wind_speed, self.config.wind_direction.to_radians())
    }

    /// Water current velocity in the world frame (constant).
    pub fn current_vector(&self) -> Vec2 {
        vector_of(
            self.config.current_speed,
            self.config.current_direction.to_radians(),
        )
    }

    /// Advance the wind process one timestep.
    pub fn execute(&mut self, dt: f32) {
        self.time += dt;
        match self.gust {
            Gust::Gusting {
                started_at,
                duration,
            } => {
                self.random_walk(
                    self.config.wind_gust_min_speed,
                    self.config.wind_gust_max_speed,
                    self.config.wind_gust_max_delta_percent,
                );
                if self.time - started_at >= duration {
                    self.gust = Gust::Calm;
                    debug!(wind_speed = self.wind_speed, "gust ended");
                }
            }
            Gust::Calm => {
                self.random_walk(
                    self.config.wind_min_speed,
                    self.config.wind_max_speed,
                    self.config.wind_max_delta_percent,
                );
                if self.rng.gen_bool(f64::from(self.config.wind_gust_probability)) {
                    let duration = self.sample_gust_duration(dt);
                    self.gust = Gust::Gusting {
                        started_at: self.time,
                        duration,
                    };
                    debug!(duration, "gust started");
                }
            }
        }
    }

    /// One walk step: choose uniformly among grid speeds in `[min, max)`
    /// lying strictly within ±`max_delta_percent` of the current speed; keep
    /// the current speed when no grid value qualifies.
    fn random_walk(&mut self, min_speed: f32, max_speed: f32, max_delta_percent: f32) {
        let lo = self.wind_speed * (1.0 - max_delta_percent / 100.0);
        let hi = self.wind_speed * (1.0 + max_delta_percent / 100.0);
        let candidates: Vec<f32> = discrete_range(min_speed, max_speed, 0.1)
            .filter(|s| *s > lo && *s < hi)
            .collect();
        if let Some(next) = candidates.choose(&mut self.rng) {
            self.wind_speed = *next;
        }
    }

    fn sample_gust_duration(&mut self, dt: f32) -> f32 {
        let candidates: Vec<f32> = discrete_range(
            self.config.wind_gust_min_duration,
            self.config.wind_gust_max_duration,
            dt,
        )
        .collect();
        candidates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(self.config.wind_gust_min_duration)
    }
}

/// Half-open arithmetic grid `start, start+step, …` up to (excluding) `stop`.
fn discrete_range(start: f32, stop: f32, step: f32) -> impl Iterator<Item = f32> {
    let count = if stop > start && step > 0.0 {
        ((stop - start) / step).ceil() as usize
    } else {
        0
    };
    (0..count).map(move |i| start + step * i as f32)
}
