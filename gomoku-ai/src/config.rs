//! AI 配置

use std::num::NonZeroU8;

use gomoku_core::GomokuError;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::transposition::DEFAULT_TT_SIZE_MB;

/// 默认 Zobrist 种子
pub const DEFAULT_ZOBRIST_SEED: u64 = 0xDEAD_BEEF_CAFE_1234;

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// 对应的搜索层数
    pub fn depth(&self) -> NonZeroU8 {
        let plies = match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        };
        NonZeroU8::new(plies).unwrap_or(NonZeroU8::MIN)
    }
}

/// 棋型权重（各项独立相加）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternWeights {
    pub open_two: f64,
    pub closed_two: f64,
    pub open_three: f64,
    pub closed_three: f64,
    pub open_four: f64,
    pub closed_four: f64,
    /// 连五（每个长度为 5 的窗口）
    pub five: f64,
}

impl Default for PatternWeights {
    fn default() -> Self {
        Self {
            open_two: 10.0,
            closed_two: 1.0,
            open_three: 100.0,
            closed_three: 10.0,
            open_four: 1000.0,
            closed_four: 100.0,
            five: 10000.0,
        }
    }
}

impl PatternWeights {
    fn validate(&self) -> std::result::Result<(), GomokuError> {
        let all = [
            ("open_two", self.open_two),
            ("closed_two", self.closed_two),
            ("open_three", self.open_three),
            ("closed_three", self.closed_three),
            ("open_four", self.open_four),
            ("closed_four", self.closed_four),
            ("five", self.five),
        ];
        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(GomokuError::InvalidConfig {
                    reason: format!("weight {name} must be finite and non-negative, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// 显式搜索层数，缺省时按难度取值
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<NonZeroU8>,
    pub weights: PatternWeights,
    /// 对手得分系数 k：总分 = 己方 − k × 对方
    pub opponent_factor: f64,
    /// 搜索树内一旦连五立即返回胜负值，不再向下展开
    pub stop_on_five: bool,
    /// 每次 `next_move` 前清空置换表
    pub clear_cache_between_moves: bool,
    /// 置换表大小（MB）
    pub tt_size_mb: usize,
    pub zobrist_seed: u64,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            depth: None,
            weights: PatternWeights::default(),
            opponent_factor: 1.0,
            stop_on_five: false,
            clear_cache_between_moves: false,
            tt_size_mb: DEFAULT_TT_SIZE_MB,
            zobrist_seed: DEFAULT_ZOBRIST_SEED,
        }
    }

    /// 实际使用的搜索层数
    pub fn search_depth(&self) -> NonZeroU8 {
        self.depth.unwrap_or_else(|| self.difficulty.depth())
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> std::result::Result<(), GomokuError> {
        self.weights.validate()?;
        if self.tt_size_mb == 0 {
            return Err(GomokuError::InvalidConfig {
                reason: "tt_size_mb must be at least 1".to_string(),
            });
        }
        if !self.opponent_factor.is_finite() || self.opponent_factor < 0.0 {
            return Err(GomokuError::InvalidConfig {
                reason: format!(
                    "opponent_factor must be finite and non-negative, got {}",
                    self.opponent_factor
                ),
            });
        }
        Ok(())
    }

    /// 从 JSON 解析（缺省字段取默认值）
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AiError;

    #[test]
    fn test_difficulty_config() {
        let easy = AiConfig::from_difficulty(Difficulty::Easy);
        assert_eq!(easy.search_depth().get(), 1);

        let medium = AiConfig::from_difficulty(Difficulty::Medium);
        assert_eq!(medium.search_depth().get(), 2);

        let hard = AiConfig::from_difficulty(Difficulty::Hard);
        assert_eq!(hard.search_depth().get(), 3);
        assert_eq!(hard.opponent_factor, 1.0);
    }

    #[test]
    fn test_default_is_valid() {
        assert!(AiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = AiConfig::from_difficulty(Difficulty::Hard);
        config.opponent_factor = 0.5;
        config.stop_on_five = true;

        let json = config.to_json().unwrap();
        let back = AiConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AiConfig::from_json(r#"{ "depth": 4, "weights": { "five": 5000.0 } }"#).unwrap();
        assert_eq!(config.search_depth().get(), 4);
        assert_eq!(config.weights.five, 5000.0);
        assert_eq!(config.weights.open_four, 1000.0);
        assert_eq!(config.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_difficulty_from_json_sets_depth() {
        let config = AiConfig::from_json(r#"{ "difficulty": "Hard" }"#).unwrap();
        assert_eq!(config.depth, None);
        assert_eq!(config.search_depth().get(), 3);

        let config = AiConfig::from_json(r#"{ "difficulty": "Easy" }"#).unwrap();
        assert_eq!(config.search_depth().get(), 1);

        assert_eq!(AiConfig::from_json("{}").unwrap().search_depth().get(), 2);
    }

    #[test]
    fn test_explicit_depth_overrides_difficulty() {
        let config = AiConfig::from_json(r#"{ "difficulty": "Hard", "depth": 1 }"#).unwrap();
        assert_eq!(config.search_depth().get(), 1);

        // 未设置层数时不写出 depth，重新加载后仍随难度
        let json = AiConfig::from_difficulty(Difficulty::Hard).to_json().unwrap();
        assert!(!json.contains("\"depth\""));
        assert_eq!(AiConfig::from_json(&json).unwrap().search_depth().get(), 3);
    }

    #[test]
    fn test_zero_tt_size_rejected() {
        let err = AiConfig::from_json(r#"{ "tt_size_mb": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            AiError::Gomoku(GomokuError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = AiConfig::from_json(r#"{ "depth": 0 }"#).unwrap_err();
        assert!(matches!(err, AiError::Json(_)));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = AiConfig::from_json(r#"{ "weights": { "open_two": -1.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            AiError::Gomoku(GomokuError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_nan_factor_rejected() {
        let config = AiConfig {
            opponent_factor: f64::NAN,
            ..AiConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
