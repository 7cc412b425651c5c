//! 答案解析层
//!
//! 把 OCR 识别出的文本行转换成 `题号 → 答案` 映射。
//!
//! - `normalizer` - 去除空白行
//! - `mcq` / `true_false` / `fill_in` / `matching` - 各题型的容错解析器
//! - `sheet` - 对同一组文本行运行全部解析器
//!
//! 解析器互不依赖、没有副作用；无法识别的行直接跳过，不会报错。
//! 同一题号出现多次时，后解析到的答案覆盖之前的答案。

pub mod fill_in;
pub mod matching;
pub mod mcq;
pub mod normalizer;
pub mod sheet;
pub mod true_false;

use regex::Regex;
use tracing::debug;

use crate::error::ConfigError;
use crate::models::answer::{AnswerMapping, QuestionNumber, MAX_QUESTION_NUMBER};

pub use fill_in::FillInParser;
pub use matching::MatchingParser;
pub use mcq::{McqParser, McqStrategy};
pub use normalizer::normalize_lines;
pub use sheet::{ParsedSheet, ParserSet};
pub use true_false::TrueFalseParser;

/// 题型解析器
pub trait AnswerParser {
    /// 解析器名称（用于日志）
    fn name(&self) -> &'static str;

    /// 解析一行，把识别到的答案写入 `answers`
    fn parse_line(&self, line: &str, answers: &mut AnswerMapping);

    /// 按顺序解析所有行
    fn parse(&self, lines: &[String]) -> AnswerMapping {
        let mut answers = AnswerMapping::new();
        for line in lines {
            self.parse_line(line, &mut answers);
        }
        debug!("{} 解析出 {} 个答案", self.name(), answers.len());
        answers
    }
}

/// 编译正则表达式
pub(crate) fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// 解析题号，0 或超过 3 位的数字视为无效
pub(crate) fn question_number(raw: &str) -> Option<QuestionNumber> {
    raw.parse::<QuestionNumber>()
        .ok()
        .filter(|n| (1..=MAX_QUESTION_NUMBER).contains(n))
}

/// 写入一条答案（后写覆盖）
pub(crate) fn record(answers: &mut AnswerMapping, raw_number: &str, answer: String) {
    if let Some(question) = question_number(raw_number) {
        if let Some(previous) = answers.insert(question, answer) {
            debug!("题目 {} 的答案被覆盖 (原答案: {})", question, previous);
        }
    }
}
