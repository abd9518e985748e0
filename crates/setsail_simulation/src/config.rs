//! Загрузка и валидация ShipAIConfig
//!
//! Формат: JSON, отсутствующие поля берутся из `ShipAIConfig::default()`.

use thiserror::Error;

use crate::ai::ShipAIConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse ship AI config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {value} (expected finite, non-negative)")]
    InvalidValue { field: &'static str, value: f32 },
}

impl ShipAIConfig {
    /// Распарсить и провалидировать конфиг
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ShipAIConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Все tunables должны быть конечными и неотрицательными.
    ///
    /// Порядок радиусов (`stopping < attack < sight`): только warning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("move_speed", self.move_speed),
            ("stopping_range", self.stopping_range),
            ("attack_range", self.attack_range),
            ("sight_range", self.sight_range),
            ("attack_turn_rate_deg", self.attack_turn_rate_deg),
            ("wander_forward_offset", self.wander_forward_offset),
            ("wander_jitter", self.wander_jitter),
            ("ray_height", self.ray_height),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if !self.ranges_ordered() {
            crate::log_warning(&format!(
                "ShipAIConfig: expected stopping_range < attack_range < sight_range, got {} / {} / {}",
                self.stopping_range, self.attack_range, self.sight_range
            ));
        }

        Ok(())
    }

    pub fn ranges_ordered(&self) -> bool {
        self.stopping_range < self.attack_range && self.attack_range < self.sight_range
    }
}
