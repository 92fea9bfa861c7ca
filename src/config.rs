use std::time::Duration;

#[derive(Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("fall delay must be positive")]
    ZeroFallDelay,
    #[display("minimum fall delay {min:?} exceeds initial fall delay {initial:?}")]
    FloorAboveInitial { min: Duration, initial: Duration },
    #[display("fast drop delay must be positive")]
    ZeroFastDropDelay,
    #[display("decay percent {_0} not in 1..=100")]
    DecayOutOfRange(#[error(not(source))] u32),
}

/// Pacing and randomness knobs of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Initial gravity interval.
    pub fall_delay: Duration,
    /// Gravity never gets faster than this.
    pub min_fall_delay: Duration,
    /// Interval used while fast drop is held; unaffected by speed.
    pub fast_drop_delay: Duration,
    /// Each lock multiplies the gravity interval by `decay_percent / 100`.
    pub decay_percent: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            fall_delay: Duration::from_micros(250_000),
            min_fall_delay: Duration::from_micros(50_000),
            fast_drop_delay: Duration::from_micros(50_000),
            decay_percent: 97,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fall_delay.is_zero() {
            return Err(ConfigError::ZeroFallDelay);
        }
        if self.min_fall_delay > self.fall_delay {
            return Err(ConfigError::FloorAboveInitial {
                min: self.min_fall_delay,
                initial: self.fall_delay,
            });
        }
        if self.fast_drop_delay.is_zero() {
            return Err(ConfigError::ZeroFastDropDelay);
        }
        if !(1..=100).contains(&self.decay_percent) {
            return Err(ConfigError::DecayOutOfRange(self.decay_percent));
        }
        Ok(())
    }

    /// Gravity interval after one more lock: decayed, then clamped to the floor.
    pub fn next_fall_delay(&self, current: Duration) -> Duration {
        let micros = current.as_micros() * u128::from(self.decay_percent) / 100;
        let micros = u64::try_from(micros).unwrap_or(u64::MAX);
        Duration::from_micros(micros).max(self.min_fall_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let base = GameConfig::default();
        let c = GameConfig {
            fall_delay: Duration::ZERO,
            ..base.clone()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroFallDelay));
        let c = GameConfig {
            min_fall_delay: Duration::from_secs(1),
            ..base.clone()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::FloorAboveInitial { .. })
        ));
        let c = GameConfig {
            fast_drop_delay: Duration::ZERO,
            ..base.clone()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroFastDropDelay));
        let c = GameConfig {
            decay_percent: 0,
            ..base
        };
        assert_eq!(c.validate(), Err(ConfigError::DecayOutOfRange(0)));
    }

    #[test]
    fn decay_is_floored_and_clamped() {
        let c = GameConfig::default();
        assert_eq!(
            c.next_fall_delay(Duration::from_micros(250_000)),
            Duration::from_micros(242_500)
        );
        assert_eq!(
            c.next_fall_delay(Duration::from_micros(51_000)),
            Duration::from_micros(50_000)
        );
    }

    #[test]
    fn decay_of_huge_delay_does_not_overflow() {
        let c = GameConfig {
            fall_delay: Duration::from_micros(u64::MAX),
            ..GameConfig::default()
        };
        assert_eq!(c.validate(), Ok(()));
        let next = c.next_fall_delay(c.fall_delay);
        let expected = u128::from(u64::MAX) * 97 / 100;
        assert_eq!(next.as_micros(), expected);
        assert!(next < c.fall_delay);
    }
}
