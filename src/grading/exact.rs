use super::{student_answer, Grader};
use crate::models::answer::AnswerMapping;
use crate::models::grade::{GradeResult, Verdict};

/// 精确匹配评分（忽略大小写）
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatchGrader;

impl ExactMatchGrader {
    pub fn new() -> Self {
        Self
    }
}

impl Grader for ExactMatchGrader {
    fn grade(&self, student: &AnswerMapping, key: &AnswerMapping) -> GradeResult {
        let mut result = GradeResult::default();

        for (&question, expected) in key {
            let verdict = match student_answer(student, question) {
                None => Verdict::Missing {
                    question,
                    expected: expected.clone(),
                },
                Some(actual) if actual.to_uppercase() == expected.trim().to_uppercase() => {
                    Verdict::Correct {
                        question,
                        actual: actual.to_string(),
                        expected: expected.clone(),
                        similarity: None,
                    }
                }
                Some(actual) => Verdict::Incorrect {
                    question,
                    actual: actual.to_string(),
                    expected: expected.clone(),
                    similarity: None,
                },
            };
            result.push(verdict);
        }

        result
    }
}
