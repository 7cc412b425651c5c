//! 匹配（连线）题解析
//!
//! 识别 `1-C`、`1 - C`、`2:B`、`3)a`；当一行没有这些格式时，
//! 再尝试 `1 C`（右侧必须是单个字母）。

use regex::Regex;

use super::{compile, record, AnswerParser};
use crate::error::ConfigError;
use crate::models::answer::AnswerMapping;

const STRICT_PATTERN: &str = r"([0-9]{1,3})\s*[-:)]\s*([A-Za-z])";
const BARE_PATTERN: &str = r"([0-9]{1,3})\s+([A-Za-z])\b";

/// 匹配题解析器
pub struct MatchingParser {
    strict: Regex,
    bare: Regex,
}

impl MatchingParser {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            strict: compile(STRICT_PATTERN)?,
            bare: compile(BARE_PATTERN)?,
        })
    }
}

impl AnswerParser for MatchingParser {
    fn name(&self) -> &'static str {
        "匹配题解析器"
    }

    fn parse_line(&self, line: &str, answers: &mut AnswerMapping) {
        let mut matched = false;
        for caps in self.strict.captures_iter(line) {
            record(answers, &caps[1], caps[2].to_uppercase());
            matched = true;
        }
        if matched {
            return;
        }

        for caps in self.bare.captures_iter(line) {
            let token = &caps[2];
            let mut chars = token.chars();
            let single_letter = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic());
            if single_letter {
                record(answers, &caps[1], token.to_uppercase());
            }
        }
    }
}
