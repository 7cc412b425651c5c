use strsim::normalized_levenshtein;

use super::{student_answer, Grader};
use crate::error::ConfigError;
use crate::models::answer::AnswerMapping;
use crate::models::grade::{GradeResult, Verdict};

/// 默认相似度阈值
pub const DEFAULT_THRESHOLD: f64 = 0.75;

/// 文本规范化：转小写，只保留 ASCII 字母、数字和空格，去掉首尾空格
///
/// 带重音的字母和制表符等其他空白都会被删除，`café` 变成 `caf`
pub fn normalize_text(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    kept.trim().to_string()
}

/// 编辑距离相似度，范围 [0, 1]
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// 近似文本评分
///
/// 规范化后的相似度 ≥ 阈值即判为正确（用未四舍五入的值比较）
#[derive(Debug, Clone, Copy)]
pub struct ApproximateGrader {
    threshold: f64,
}

impl ApproximateGrader {
    pub fn new(threshold: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::ThresholdOutOfRange { value: threshold });
        }
        Ok(Self { threshold })
    }
}

impl Default for ApproximateGrader {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Grader for ApproximateGrader {
    fn grade(&self, student: &AnswerMapping, key: &AnswerMapping) -> GradeResult {
        let mut result = GradeResult::default();

        for (&question, expected) in key {
            let expected_norm = normalize_text(expected);
            if expected_norm.is_empty() {
                tracing::warn!("题目 {} 的标准答案为空，跳过", question);
                result.push(Verdict::NoKey { question });
                continue;
            }

            let Some(actual) = student_answer(student, question) else {
                result.push(Verdict::Missing {
                    question,
                    expected: expected.clone(),
                });
                continue;
            };

            let ratio = similarity(&normalize_text(actual), &expected_norm);
            let verdict = if ratio >= self.threshold {
                Verdict::Correct {
                    question,
                    actual: actual.to_string(),
                    expected: expected.clone(),
                    similarity: Some(ratio),
                }
            } else {
                Verdict::Incorrect {
                    question,
                    actual: actual.to_string(),
                    expected: expected.clone(),
                    similarity: Some(ratio),
                }
            };
            result.push(verdict);
        }

        result
    }
}
