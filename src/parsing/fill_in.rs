//! 填空题解析
//!
//! `2. elephant in the room` → {2: "elephant in the room"}。
//! 每行只取第一个匹配，答案里的标点不会被拆分。

use regex::Regex;

use super::{compile, record, AnswerParser};
use crate::error::ConfigError;
use crate::models::answer::AnswerMapping;

const FILL_PATTERN: &str = r"^\s*([0-9]{1,3})[.)\-:\s]+(.+)$";

/// 填空题解析器（也用于词汇题和听力题）
pub struct FillInParser {
    pattern: Regex,
}

impl FillInParser {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            pattern: compile(FILL_PATTERN)?,
        })
    }
}

impl AnswerParser for FillInParser {
    fn name(&self) -> &'static str {
        "填空题解析器"
    }

    fn parse_line(&self, line: &str, answers: &mut AnswerMapping) {
        if let Some(caps) = self.pattern.captures(line) {
            let text = caps[2].trim();
            if !text.is_empty() {
                record(answers, &caps[1], text.to_string());
            }
        }
    }
}
