use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::KeyError;
use crate::models::section::SectionKind;

/// 题号（1–3 位十进制数字）
pub type QuestionNumber = u32;

/// 题号 → 答案
///
/// 同一题号只保留一个答案，后写入的覆盖先写入的
pub type AnswerMapping = BTreeMap<QuestionNumber, String>;

/// 题号允许的最大值（最多 3 位数字）
pub const MAX_QUESTION_NUMBER: QuestionNumber = 999;

/// 将判断题的作答规范化为 "True" / "False"
///
/// 以 T 开头视为 True，以 F 开头视为 False，其他返回 None
pub fn canonical_true_false(token: &str) -> Option<&'static str> {
    match token.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('T') => Some("True"),
        Some('F') => Some("False"),
        _ => None,
    }
}

/// 教师提供的标准答案
///
/// 文件格式：`{"type": "mcq", "key": {"1": "A", "2": "C"}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAnswerKey", into = "RawAnswerKey")]
pub struct AnswerKey {
    pub kind: SectionKind,
    pub key: AnswerMapping,
}

impl AnswerKey {
    pub fn new(kind: SectionKind, key: AnswerMapping) -> Self {
        Self { kind, key }
    }

    /// 需要评分的题目数
    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

/// 答案文件的原始结构（题号为字符串，答案可能是字符串 / 布尔 / 数字）
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawAnswerKey {
    #[serde(rename = "type")]
    kind: SectionKind,
    key: BTreeMap<String, JsonValue>,
}

impl TryFrom<RawAnswerKey> for AnswerKey {
    type Error = KeyError;

    fn try_from(raw: RawAnswerKey) -> Result<Self, Self::Error> {
        if raw.kind == SectionKind::Writing {
            return Err(KeyError::UnsupportedKind { kind: raw.kind });
        }

        let mut key = AnswerMapping::new();
        for (number, value) in raw.key {
            let question = parse_question_number(&number)?;
            let answer = answer_text(question, &value)?;
            let answer = match raw.kind {
                SectionKind::TrueFalse => canonical_true_false(&answer)
                    .map(str::to_string)
                    .ok_or(KeyError::InvalidAnswer {
                        question,
                        value: answer,
                    })?,
                SectionKind::Mcq | SectionKind::Matching => answer.trim().to_uppercase(),
                _ => answer,
            };
            key.insert(question, answer);
        }

        Ok(AnswerKey {
            kind: raw.kind,
            key,
        })
    }
}

impl From<AnswerKey> for RawAnswerKey {
    fn from(answer_key: AnswerKey) -> Self {
        RawAnswerKey {
            kind: answer_key.kind,
            key: answer_key
                .key
                .into_iter()
                .map(|(q, a)| (q.to_string(), JsonValue::String(a)))
                .collect(),
        }
    }
}

fn parse_question_number(raw: &str) -> Result<QuestionNumber, KeyError> {
    let trimmed = raw.trim();
    let valid_shape =
        !trimmed.is_empty() && trimmed.len() <= 3 && trimmed.chars().all(|c| c.is_ascii_digit());

    match trimmed.parse::<QuestionNumber>() {
        Ok(n) if valid_shape && n > 0 => Ok(n),
        _ => Err(KeyError::InvalidQuestionNumber {
            raw: raw.to_string(),
        }),
    }
}

fn answer_text(question: QuestionNumber, value: &JsonValue) -> Result<String, KeyError> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Bool(true) => Ok("True".to_string()),
        JsonValue::Bool(false) => Ok("False".to_string()),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(KeyError::InvalidAnswer {
            question,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_true_false() {
        assert_eq!(canonical_true_false("T"), Some("True"));
        assert_eq!(canonical_true_false("false"), Some("False"));
        assert_eq!(canonical_true_false("TRUE"), Some("True"));
        assert_eq!(canonical_true_false("yes"), None);
        assert_eq!(canonical_true_false(""), None);
    }

    #[test]
    fn test_deserialize_mcq_key() {
        let key: AnswerKey =
            serde_json::from_str(r#"{"type": "mcq", "key": {"2": "c", "1": "A"}}"#).unwrap();
        assert_eq!(key.kind, SectionKind::Mcq);
        assert_eq!(key.key.get(&1).map(String::as_str), Some("A"));
        assert_eq!(key.key.get(&2).map(String::as_str), Some("C"));
        // 按题号排序
        assert_eq!(key.key.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_deserialize_tf_key_canonicalizes() {
        let key: AnswerKey =
            serde_json::from_str(r#"{"type": "tf", "key": {"1": "T", "2": false, "3": "true"}}"#)
                .unwrap();
        assert_eq!(key.key[&1], "True");
        assert_eq!(key.key[&2], "False");
        assert_eq!(key.key[&3], "True");
    }

    #[test]
    fn test_fill_key_keeps_text() {
        let key: AnswerKey =
            serde_json::from_str(r#"{"type": "fill", "key": {"1": "Elephant, in the room"}}"#)
                .unwrap();
        assert_eq!(key.key[&1], "Elephant, in the room");
    }

    #[test]
    fn test_rejects_bad_question_numbers() {
        for bad in [
            r#"{"type": "mcq", "key": {"q1": "A"}}"#,
            r#"{"type": "mcq", "key": {"0": "A"}}"#,
            r#"{"type": "mcq", "key": {"1000": "A"}}"#,
        ] {
            assert!(serde_json::from_str::<AnswerKey>(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_rejects_missing_type_and_writing() {
        assert!(serde_json::from_str::<AnswerKey>(r#"{"key": {"1": "A"}}"#).is_err());
        assert!(serde_json::from_str::<AnswerKey>(r#"{"type": "writing", "key": {}}"#).is_err());
    }

    #[test]
    fn test_serialize_shape() {
        let mut mapping = AnswerMapping::new();
        mapping.insert(3, "B".to_string());
        let json = serde_json::to_value(AnswerKey::new(SectionKind::Matching, mapping)).unwrap();
        assert_eq!(json["type"], "matching");
        assert_eq!(json["key"]["3"], "B");
    }
}
