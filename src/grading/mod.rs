//! 评分层
//!
//! - `exact` - 精确匹配（选择 / 判断 / 匹配）
//! - `approximate` - 近似文本匹配（填空 / 词汇 / 听力）
//! - `writing` - 写作评分标准
//! - `aggregate` - 汇总各部分得分
//!
//! 所有评分函数都是纯函数：对任何答案映射（包括空映射）都返回结果，不会失败。

pub mod aggregate;
pub mod approximate;
pub mod exact;
pub mod writing;

use crate::models::answer::{AnswerMapping, QuestionNumber};
use crate::models::grade::GradeResult;

pub use aggregate::Aggregator;
pub use approximate::{normalize_text, similarity, ApproximateGrader, DEFAULT_THRESHOLD};
pub use exact::ExactMatchGrader;
pub use writing::WritingScorer;

/// 答案比对器
///
/// 以标准答案为准：只评分标准答案中出现的题号，学生多答的题目忽略
pub trait Grader {
    fn grade(&self, student: &AnswerMapping, key: &AnswerMapping) -> GradeResult;
}

/// 学生答案（空字符串视为未作答）
pub(crate) fn student_answer<'a>(
    student: &'a AnswerMapping,
    question: QuestionNumber,
) -> Option<&'a str> {
    student
        .get(&question)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}
