use serde::{Deserialize, Serialize};

use crate::models::answer::QuestionNumber;
use crate::models::section::SectionKind;

/// 单题判定结果的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    /// 学生未作答
    Missing,
    /// 答案配置为空，不计分
    NoKey,
}

/// 单题判定
///
/// `similarity` 只在近似文本评分时存在
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Verdict {
    Correct {
        question: QuestionNumber,
        actual: String,
        expected: String,
        similarity: Option<f64>,
    },
    Incorrect {
        question: QuestionNumber,
        actual: String,
        expected: String,
        similarity: Option<f64>,
    },
    Missing {
        question: QuestionNumber,
        expected: String,
    },
    NoKey {
        question: QuestionNumber,
    },
}

impl Verdict {
    pub fn question(&self) -> QuestionNumber {
        match self {
            Verdict::Correct { question, .. }
            | Verdict::Incorrect { question, .. }
            | Verdict::Missing { question, .. }
            | Verdict::NoKey { question } => *question,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Verdict::Correct { .. } => Outcome::Correct,
            Verdict::Incorrect { .. } => Outcome::Incorrect,
            Verdict::Missing { .. } => Outcome::Missing,
            Verdict::NoKey { .. } => Outcome::NoKey,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Correct {
                question,
                actual,
                expected,
                similarity: Some(_),
            } => write!(f, "Q{}: ✔ ({} ≈ {})", question, actual, expected),
            Verdict::Correct {
                question, actual, ..
            } => write!(f, "Q{}: ✔ {}", question, actual),
            Verdict::Incorrect {
                question,
                actual,
                expected,
                similarity: Some(ratio),
            } => write!(
                f,
                "Q{}: ✘ ({}) expected ({}), similarity {:.2}",
                question, actual, expected, ratio
            ),
            Verdict::Incorrect {
                question,
                actual,
                expected,
                similarity: None,
            } => write!(f, "Q{}: ✘ {} (expected {})", question, actual, expected),
            Verdict::Missing { question, expected } => {
                write!(f, "Q{}: No answer (expected {})", question, expected)
            }
            Verdict::NoKey { question } => write!(f, "Q{}: No key", question),
        }
    }
}

/// 单个部分的评分结果：(答对数, 总题数, 逐题判定)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    pub correct: usize,
    pub total: usize,
    pub verdicts: Vec<Verdict>,
}

impl GradeResult {
    /// 追加一条判定，同时维护计数（NoKey 不计入总数）
    pub fn push(&mut self, verdict: Verdict) {
        match verdict.outcome() {
            Outcome::Correct => {
                self.correct += 1;
                self.total += 1;
            }
            Outcome::Incorrect | Outcome::Missing => self.total += 1,
            Outcome::NoKey => {}
        }
        self.verdicts.push(verdict);
    }

    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }

    /// 统计某一类判定的数量
    pub fn count(&self, outcome: Outcome) -> usize {
        self.verdicts
            .iter()
            .filter(|v| v.outcome() == outcome)
            .count()
    }

    /// 可读的判定文本（用于日志和明细记录）
    pub fn details(&self) -> Vec<String> {
        self.verdicts.iter().map(ToString::to_string).collect()
    }
}

/// 写作评分结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WritingResult {
    pub score: i32,
    pub max: i32,
    pub feedback: Vec<String>,
}

/// 一个部分的最终结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionResult {
    Graded {
        kind: SectionKind,
        result: GradeResult,
    },
    Writing(WritingResult),
}

impl SectionResult {
    pub fn graded(kind: SectionKind, result: GradeResult) -> Self {
        SectionResult::Graded { kind, result }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            SectionResult::Graded { kind, .. } => *kind,
            SectionResult::Writing(_) => SectionKind::Writing,
        }
    }

    pub fn score(&self) -> i64 {
        match self {
            SectionResult::Graded { result, .. } => result.correct as i64,
            SectionResult::Writing(w) => i64::from(w.score),
        }
    }

    pub fn max(&self) -> i64 {
        match self {
            SectionResult::Graded { result, .. } => result.total as i64,
            SectionResult::Writing(w) => i64::from(w.max),
        }
    }

    /// 判定或反馈文本
    pub fn lines(&self) -> Vec<String> {
        match self {
            SectionResult::Graded { result, .. } => result.details(),
            SectionResult::Writing(w) => w.feedback.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_display() {
        let exact = Verdict::Incorrect {
            question: 4,
            actual: "B".into(),
            expected: "C".into(),
            similarity: None,
        };
        assert_eq!(exact.to_string(), "Q4: ✘ B (expected C)");

        let fuzzy = Verdict::Incorrect {
            question: 2,
            actual: "cat".into(),
            expected: "dog".into(),
            similarity: Some(0.0),
        };
        assert_eq!(fuzzy.to_string(), "Q2: ✘ (cat) expected (dog), similarity 0.00");

        let missing = Verdict::Missing {
            question: 1,
            expected: "A".into(),
        };
        assert_eq!(missing.to_string(), "Q1: No answer (expected A)");
        assert_eq!(Verdict::NoKey { question: 9 }.to_string(), "Q9: No key");
    }

    #[test]
    fn test_push_keeps_counts() {
        let mut result = GradeResult::default();
        result.push(Verdict::Correct {
            question: 1,
            actual: "A".into(),
            expected: "A".into(),
            similarity: None,
        });
        result.push(Verdict::Missing {
            question: 2,
            expected: "B".into(),
        });
        result.push(Verdict::NoKey { question: 3 });

        assert_eq!(result.correct, 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.verdicts.len(), 3);
        assert_eq!(result.count(Outcome::Missing), 1);
        assert!(!result.is_perfect());
    }

    #[test]
    fn test_section_result_scores() {
        let writing = SectionResult::Writing(WritingResult {
            score: 7,
            max: 10,
            feedback: vec!["Too short.".into()],
        });
        assert_eq!(writing.kind(), SectionKind::Writing);
        assert_eq!((writing.score(), writing.max()), (7, 10));
        assert_eq!(writing.lines(), vec!["Too short.".to_string()]);
    }
}
