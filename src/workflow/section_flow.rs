//! 单个部分的评分流程 - 流程层
//!
//! 核心职责：根据题型选择学生答案来源和评分器
//!
//! - 选择 / 判断 / 匹配 → 对应解析结果 → 精确匹配
//! - 填空 / 词汇 → 填空解析结果 → 近似匹配
//! - 听力 → 单独输入（没有时用填空解析结果）→ 近似匹配
//! - 写作 → 单独输入（没有时用答题卡全文）→ 评分标准

use tracing::info;

use crate::config::Config;
use crate::error::ConfigError;
use crate::grading::{ApproximateGrader, ExactMatchGrader, Grader, WritingScorer};
use crate::models::answer::{AnswerKey, AnswerMapping};
use crate::models::grade::SectionResult;
use crate::models::loaders::{LoadedSection, SectionConfig};
use crate::models::section::SectionKind;
use crate::parsing::ParsedSheet;
use crate::workflow::grading_ctx::GradingCtx;

/// 单个部分的评分流程
///
/// - 不持有任何文件或 OCR 资源
/// - 评分不会失败，任何输入都能得到结果
pub struct SectionFlow {
    exact: ExactMatchGrader,
    approximate: ApproximateGrader,
    writing: WritingScorer,
    verbose_logging: bool,
}

impl SectionFlow {
    /// 创建新的评分流程
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            exact: ExactMatchGrader::new(),
            approximate: ApproximateGrader::new(config.fill_threshold)?,
            writing: WritingScorer::new()?,
            verbose_logging: config.verbose_logging,
        })
    }

    pub fn run(&self, section: &LoadedSection, sheet: &ParsedSheet, ctx: &GradingCtx) -> SectionResult {
        info!("{} 📋 正在评分 {} ({})", ctx, section.label, section.config.kind());

        let result = match &section.config {
            SectionConfig::Keyed(key) => self.grade_keyed(key, sheet, ctx),
            SectionConfig::Writing(rubric) => {
                let default_text;
                let text = match &ctx.writing_text {
                    Some(text) => text.as_str(),
                    None => {
                        default_text = sheet.joined_text();
                        default_text.as_str()
                    }
                };
                SectionResult::Writing(self.writing.score(text, rubric))
            }
        };

        self.log_result(ctx, &section.label, &result);
        result
    }

    fn grade_keyed(&self, key: &AnswerKey, sheet: &ParsedSheet, ctx: &GradingCtx) -> SectionResult {
        let empty = AnswerMapping::new();
        let student = match (key.kind, &ctx.listening) {
            (SectionKind::Listening, Some(listening)) => listening,
            (kind, _) => sheet.answers_for(kind).unwrap_or(&empty),
        };

        let grader: &dyn Grader = if key.kind.is_exact() {
            &self.exact
        } else {
            &self.approximate
        };

        SectionResult::graded(key.kind, grader.grade(student, &key.key))
    }

    // ========== 日志辅助方法 ==========

    fn log_result(&self, ctx: &GradingCtx, label: &str, result: &SectionResult) {
        info!("{} ✓ {}: {}/{}", ctx, label, result.score(), result.max());
        if self.verbose_logging {
            for line in result.lines() {
                info!("{}   - {}", ctx, line);
            }
        }
    }
}
