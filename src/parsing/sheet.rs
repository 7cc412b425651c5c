use tracing::info;

use super::{
    normalize_lines, AnswerParser, FillInParser, MatchingParser, McqParser, McqStrategy,
    TrueFalseParser,
};
use crate::error::ConfigError;
use crate::models::answer::AnswerMapping;
use crate::models::section::SectionKind;

/// 全部题型解析器
///
/// 正则在创建时编译一次，之后可反复使用
pub struct ParserSet {
    mcq: McqParser,
    true_false: TrueFalseParser,
    fill_in: FillInParser,
    matching: MatchingParser,
}

impl ParserSet {
    pub fn new(mcq_strategy: McqStrategy) -> Result<Self, ConfigError> {
        Ok(Self {
            mcq: McqParser::new(mcq_strategy)?,
            true_false: TrueFalseParser::new()?,
            fill_in: FillInParser::new()?,
            matching: MatchingParser::new()?,
        })
    }

    /// 填空解析器（听力的手工输入也用它解析）
    pub fn fill_in(&self) -> &FillInParser {
        &self.fill_in
    }

    /// 规范化文本行后运行全部解析器
    pub fn parse_sheet<S: AsRef<str>>(&self, fragments: &[S]) -> ParsedSheet {
        let lines = normalize_lines(fragments);

        let sheet = ParsedSheet {
            mcq: self.mcq.parse(&lines),
            true_false: self.true_false.parse(&lines),
            fill_in: self.fill_in.parse(&lines),
            matching: self.matching.parse(&lines),
            lines,
        };

        info!(
            "📝 解析结果: 选择 {} | 判断 {} | 填空 {} | 匹配 {}",
            sheet.mcq.len(),
            sheet.true_false.len(),
            sheet.fill_in.len(),
            sheet.matching.len()
        );

        sheet
    }
}

/// 一张答题卡的解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSheet {
    /// 规范化后的文本行
    pub lines: Vec<String>,
    pub mcq: AnswerMapping,
    pub true_false: AnswerMapping,
    pub fill_in: AnswerMapping,
    pub matching: AnswerMapping,
}

impl ParsedSheet {
    /// 获取某个题型对应的学生答案
    ///
    /// 词汇题和听力题使用填空解析结果；写作题没有答案映射
    pub fn answers_for(&self, kind: SectionKind) -> Option<&AnswerMapping> {
        match kind {
            SectionKind::Mcq => Some(&self.mcq),
            SectionKind::TrueFalse => Some(&self.true_false),
            SectionKind::Matching => Some(&self.matching),
            SectionKind::FillIn | SectionKind::Vocabulary | SectionKind::Listening => {
                Some(&self.fill_in)
            }
            SectionKind::Writing => None,
        }
    }

    /// 用换行拼接的原始文本（写作题的默认输入）
    pub fn joined_text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_parsers_run_independently() {
        let parsers = ParserSet::new(McqStrategy::AllShapes).unwrap();
        let sheet = parsers.parse_sheet(&["  1. A ", "", "2: T", "3. elephant", "4-C"]);

        assert_eq!(sheet.lines.len(), 4);
        assert_eq!(sheet.mcq.get(&1).map(String::as_str), Some("A"));
        assert_eq!(sheet.true_false.get(&2).map(String::as_str), Some("True"));
        assert_eq!(sheet.fill_in.get(&3).map(String::as_str), Some("elephant"));
        assert_eq!(sheet.matching.get(&4).map(String::as_str), Some("C"));
        // 同一行会被多个解析器识别
        assert_eq!(sheet.fill_in.get(&1).map(String::as_str), Some("A"));
    }

    #[test]
    fn test_answers_for_kind() {
        let parsers = ParserSet::new(McqStrategy::default()).unwrap();
        let sheet = parsers.parse_sheet(&["1. apple"]);
        assert_eq!(
            sheet.answers_for(SectionKind::Vocabulary),
            Some(&sheet.fill_in)
        );
        assert!(sheet.answers_for(SectionKind::Writing).is_none());
    }

    #[test]
    fn test_empty_input() {
        let parsers = ParserSet::new(McqStrategy::default()).unwrap();
        let sheet = parsers.parse_sheet::<String>(&[]);
        assert_eq!(sheet, ParsedSheet::default());
        assert_eq!(sheet.joined_text(), "");
    }
}
