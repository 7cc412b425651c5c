//! 判断题解析
//!
//! 识别 `5: T`、`5-False`、`5) true` 等格式，一行可包含多个答案

use regex::Regex;

use super::{compile, record, AnswerParser};
use crate::error::ConfigError;
use crate::models::answer::{canonical_true_false, AnswerMapping};

const TF_PATTERN: &str = r"(?i)([0-9]{1,3})\s*[:\-).]\s*(true|false|t|f)";

/// 判断题解析器，答案统一为 "True" / "False"
pub struct TrueFalseParser {
    pattern: Regex,
}

impl TrueFalseParser {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            pattern: compile(TF_PATTERN)?,
        })
    }
}

impl AnswerParser for TrueFalseParser {
    fn name(&self) -> &'static str {
        "判断题解析器"
    }

    fn parse_line(&self, line: &str, answers: &mut AnswerMapping) {
        for caps in self.pattern.captures_iter(line) {
            if let Some(value) = canonical_true_false(&caps[2]) {
                record(answers, &caps[1], value.to_string());
            }
        }
    }
}
