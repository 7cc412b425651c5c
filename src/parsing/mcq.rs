//! 选择题解析
//!
//! 支持的格式：`1 A`、`1. A`、`1) A`、`1:A`、`1-A`，
//! 以及一行内的多个答案，如 `1-A 2-B`。

use regex::Regex;

use super::{compile, record, AnswerParser};
use crate::error::ConfigError;
use crate::models::answer::AnswerMapping;

const STRICT_PATTERN: &str = r"^\s*([0-9]{1,3})[.)\-: ]+\s*([A-Da-d])\b";
const SPACED_PATTERN: &str = r"^\s*([0-9]{1,3})\s+([A-Da-d])\b";
const INLINE_PATTERN: &str = r"([0-9]{1,3})\s*[:\-).]\s*([A-Da-d])";

/// 单行的解析策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum McqStrategy {
    /// 依次应用全部格式，所有匹配都写入（支持一行多答案）
    #[default]
    AllShapes,
    /// 行首格式命中后不再尝试后续格式
    FirstShape,
}

/// 选择题解析器
pub struct McqParser {
    strict: Regex,
    spaced: Regex,
    inline: Regex,
    strategy: McqStrategy,
}

impl McqParser {
    pub fn new(strategy: McqStrategy) -> Result<Self, ConfigError> {
        Ok(Self {
            strict: compile(STRICT_PATTERN)?,
            spaced: compile(SPACED_PATTERN)?,
            inline: compile(INLINE_PATTERN)?,
            strategy,
        })
    }

    /// 行首格式（a）（b），命中返回 true
    fn apply_anchored(&self, re: &Regex, line: &str, answers: &mut AnswerMapping) -> bool {
        match re.captures(line) {
            Some(caps) => {
                record(answers, &caps[1], caps[2].to_uppercase());
                true
            }
            None => false,
        }
    }
}

impl AnswerParser for McqParser {
    fn name(&self) -> &'static str {
        "选择题解析器"
    }

    fn parse_line(&self, line: &str, answers: &mut AnswerMapping) {
        let first_shape = self.strategy == McqStrategy::FirstShape;

        if self.apply_anchored(&self.strict, line, answers) && first_shape {
            return;
        }
        if self.apply_anchored(&self.spaced, line, answers) && first_shape {
            return;
        }

        for caps in self.inline.captures_iter(line) {
            record(answers, &caps[1], caps[2].to_uppercase());
        }
    }
}
