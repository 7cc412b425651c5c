//! # Auto Grade
//!
//! 答题卡自动评分：对上传的答题卡图片做 OCR，把识别出的文本解析成各题型的答案，
//! 再与教师提供的标准答案比对，得出逐题判定和总分。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 题型、答案映射、标准答案、评分标准、判定结果
//! - `models/loaders` - 从 JSON 文件加载答案和评分标准
//!
//! ### ② 核心逻辑（Parsing / Grading）
//! - `parsing/` - 选择 / 判断 / 填空 / 匹配 的容错解析器
//! - `grading/` - 精确匹配、近似文本匹配、写作评分、总分汇总
//!
//! ### ③ 业务能力层（Services）
//! - `OcrService` - 调用外部 OCR，或读取已识别的文本
//! - `ResultStore` - 追加成绩表、写入逐题明细
//!
//! ### ④ 流程层（Workflow）
//! - `SectionFlow` - 按题型选择答案来源和评分器
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator::App` - 一次完整的评分会话
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod grading;
pub mod models;
pub mod orchestrator;
pub mod parsing;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use grading::{Aggregator, ApproximateGrader, ExactMatchGrader, Grader, WritingScorer};
pub use models::{AnswerKey, AnswerMapping, GradeResult, Rubric, SectionKind, SectionResult, Verdict};
pub use orchestrator::{App, SessionOutcome};
pub use parsing::{AnswerParser, ParsedSheet, ParserSet};
pub use services::{OcrEngine, OcrService};
pub use workflow::{GradingCtx, SectionFlow};
