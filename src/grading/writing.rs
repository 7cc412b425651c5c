//! 写作评分
//!
//! 从满分开始，按以下顺序扣分：
//! 1. 词数不足 −2
//! 2. 每缺少一个关键词 −1
//! 3. 可疑拼写（含撇号的词）最多 −2
//! 4. 首字母未大写 −1
//! 5. 结尾没有 `.` `!` `?` −1
//!
//! 最终得分不低于 0。

use regex::Regex;

use crate::error::ConfigError;
use crate::models::grade::WritingResult;
use crate::models::rubric::Rubric;
use crate::parsing::compile;

const WORD_PATTERN: &str = r"[A-Za-z']+";
const MAX_MECHANICS_PENALTY: usize = 2;

/// 写作评分器
pub struct WritingScorer {
    word: Regex,
}

impl WritingScorer {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            word: compile(WORD_PATTERN)?,
        })
    }

    pub fn score(&self, text: &str, rubric: &Rubric) -> WritingResult {
        let s = text.trim();
        let mut score = rubric.max_score;
        let mut feedback = Vec::new();

        if s.split_whitespace().count() < rubric.min_words() {
            feedback.push("Too short.".to_string());
            score -= 2;
        }

        let lowered = s.to_lowercase();
        for keyword in &rubric.keywords {
            if !lowered.contains(&keyword.to_lowercase()) {
                feedback.push(format!("Missing keyword: {}", keyword));
                score -= 1;
            }
        }

        let suspicious = self.count_suspicious_tokens(s);
        if suspicious > 0 {
            feedback.push(format!("Possible errors detected: {} tokens.", suspicious));
            score -= suspicious.min(MAX_MECHANICS_PENALTY) as i32;
        }

        if !s.chars().next().is_some_and(char::is_uppercase) {
            feedback.push("Start with a capital letter.".to_string());
            score -= 1;
        }

        if !s.is_empty() && !s.ends_with(['.', '!', '?']) {
            feedback.push("Missing ending punctuation.".to_string());
            score -= 1;
        }

        WritingResult {
            score: score.max(0),
            max: rubric.max_score,
            feedback,
        }
    }

    /// 长度大于 1 且不全是字母的词（即包含撇号）
    fn count_suspicious_tokens(&self, text: &str) -> usize {
        self.word
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|t| t.chars().count() > 1 && !t.chars().all(char::is_alphabetic))
            .count()
    }
}
