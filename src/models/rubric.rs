use serde::{Deserialize, Serialize};

/// 写作评分标准
///
/// 文件格式：`{"length": {"min": 20}, "keywords": ["because"], "max_score": 10}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    #[serde(default)]
    pub length: LengthRule,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_max_score")]
    pub max_score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthRule {
    #[serde(default = "default_min_words")]
    pub min: usize,
}

fn default_min_words() -> usize {
    5
}

fn default_max_score() -> i32 {
    10
}

impl Default for LengthRule {
    fn default() -> Self {
        Self {
            min: default_min_words(),
        }
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            length: LengthRule::default(),
            keywords: Vec::new(),
            max_score: default_max_score(),
        }
    }
}

impl Rubric {
    pub fn new(min_words: usize, keywords: Vec<String>, max_score: i32) -> Self {
        Self {
            length: LengthRule { min: min_words },
            keywords,
            max_score,
        }
    }

    /// 最少词数
    pub fn min_words(&self) -> usize {
        self.length.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let rubric: Rubric = serde_json::from_str("{}").unwrap();
        assert_eq!(rubric, Rubric::default());
        assert_eq!(rubric.min_words(), 5);
        assert_eq!(rubric.max_score, 10);
    }

    #[test]
    fn test_full_rubric() {
        let rubric: Rubric = serde_json::from_str(
            r#"{"length": {"min": 20}, "keywords": ["because", "but"], "max_score": 15}"#,
        )
        .unwrap();
        assert_eq!(rubric, Rubric::new(20, vec!["because".into(), "but".into()], 15));
    }

    #[test]
    fn test_ignores_type_field() {
        let rubric: Rubric =
            serde_json::from_str(r#"{"type": "writing", "max_score": 8}"#).unwrap();
        assert_eq!(rubric.max_score, 8);
    }
}
