//! 评分会话 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次评分会话的调度和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、创建 OCR 服务、编译解析器
//! 2. **加载答案**：扫描答案目录，单个文件出错只跳过该部分
//! 3. **识别答题卡**：调用 OCR，失败时以空文本继续并记入警告
//! 4. **逐部分评分**：委托 `SectionFlow`，部分之间互不影响
//! 5. **汇总与保存**：累计总分，按需写入成绩表和明细
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有 OCR 服务和成绩存储的模块
//! - **显式注入**：OCR 引擎通过构造参数传入，初始化一次后可重复使用

use crate::config::Config;
use crate::grading::Aggregator;
use crate::models::answer::AnswerMapping;
use crate::models::loaders::{load_all_sections, LoadedSection};
use crate::parsing::{normalize_lines, AnswerParser, ParsedSheet, ParserSet};
use crate::services::{OcrEngine, OcrService, ResultRow, ResultStore, Student};
use crate::utils::logging::{
    append_log_line, init_log_file, log_ocr_lines, log_sections_loaded, log_startup,
    print_final_stats,
};
use crate::workflow::{GradingCtx, SectionFlow};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 一次评分会话的结果
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// 答题卡解析结果
    pub sheet: ParsedSheet,
    /// 各部分得分与总分
    pub report: Aggregator,
    /// 保存到成绩表的记录（未开启保存或保存失败时为 None）
    pub saved: Option<ResultRow>,
    /// 未中止评分的问题（OCR 失败、输入文件无法读取、保存失败）
    pub warnings: Vec<String>,
}

/// 应用主结构
pub struct App<E = OcrService> {
    config: Config,
    engine: E,
    parsers: ParserSet,
    flow: SectionFlow,
    store: ResultStore,
}

impl App<OcrService> {
    /// 初始化应用（根据配置选择 OCR 服务）
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config.answer_key_dir.display().to_string());

        let engine = OcrService::from_config(&config);
        if engine.needs_image() && config.image_path.is_none() {
            warn!("⚠️ 未设置 IMAGE_PATH，答题卡将按空白处理");
        }
        Self::with_engine(config, engine)
    }
}

impl<E: OcrEngine> App<E> {
    /// 使用指定的 OCR 引擎创建应用
    pub fn with_engine(config: Config, engine: E) -> Result<Self> {
        let parsers = ParserSet::new(config.mcq_strategy())?;
        let flow = SectionFlow::new(&config)?;
        let store = ResultStore::new(config.results_dir.clone());

        Ok(Self {
            config,
            engine,
            parsers,
            flow,
            store,
        })
    }

    /// 运行一次评分会话
    pub async fn run(&self) -> Result<SessionOutcome> {
        let mut warnings = Vec::new();

        // 加载答案
        let sections = self.load_sections().await?;
        if sections.is_empty() {
            warn!("⚠️ 没有找到可用的答案文件，所有部分都将跳过");
        }
        log_sections_loaded(sections.len());

        // 识别并解析答题卡
        let lines = self.recognize(&mut warnings).await;
        log_ocr_lines(&lines, self.config.verbose_logging);
        let sheet = self.parsers.parse_sheet(&lines);

        // 逐部分评分
        let ctx = self.build_ctx(&mut warnings).await;
        let report = self.grade_sections(&sections, &sheet, &ctx);

        // 输出最终统计
        print_final_stats(
            report.total_score(),
            report.total_max(),
            &self.config.output_log_file,
        );
        self.write_summary(&ctx, &report);

        // 保存成绩（失败时保留已算出的成绩）
        let saved = if self.config.save_results {
            let today = chrono::Local::now().date_naive();
            match self.store.save(&ctx.student, &report, today).await {
                Ok(row) => Some(row),
                Err(e) => {
                    push_warning(&mut warnings, format!("保存成绩失败: {}", e));
                    None
                }
            }
        } else {
            None
        };

        Ok(SessionOutcome {
            sheet,
            report,
            saved,
            warnings,
        })
    }

    /// 对所有部分评分并汇总
    ///
    /// 各部分独立评分，处理顺序不影响任何部分的得分
    pub fn grade_sections(
        &self,
        sections: &[LoadedSection],
        sheet: &ParsedSheet,
        ctx: &GradingCtx,
    ) -> Aggregator {
        let mut report = Aggregator::new();
        for section in sections {
            let result = self.flow.run(section, sheet, ctx);
            report.record(section.label.clone(), result);
        }
        report
    }

    /// 加载答案文件
    async fn load_sections(&self) -> Result<Vec<LoadedSection>> {
        info!("\n📁 正在扫描答案文件...");
        load_all_sections(&self.config.answer_key_dir, Some(&self.config.rubric_file)).await
    }

    /// 调用 OCR，失败时返回空文本（所有题目都会记为未作答）
    async fn recognize(&self, warnings: &mut Vec<String>) -> Vec<String> {
        let image = self.config.image_path.clone().unwrap_or_default();
        match self.engine.recognize(&image).await {
            Ok(lines) => lines,
            Err(e) => {
                push_warning(warnings, format!("OCR 失败，按空白答题卡继续评分: {}", e));
                Vec::new()
            }
        }
    }

    /// 构建评分上下文（读取听力和写作的单独输入）
    async fn build_ctx(&self, warnings: &mut Vec<String>) -> GradingCtx {
        let student = Student::new(&self.config.student_name, &self.config.student_id);
        let mut ctx = GradingCtx::new(student);

        if let Some(text) = read_optional(self.config.listening_file.as_ref(), warnings).await {
            let lines = normalize_lines(text.lines());
            let listening: AnswerMapping = self.parsers.fill_in().parse(&lines);
            info!("🎧 听力输入解析出 {} 个答案", listening.len());
            ctx = ctx.with_listening(listening);
        }

        if let Some(text) = read_optional(self.config.writing_text_file.as_ref(), warnings).await {
            ctx = ctx.with_writing_text(text);
        }

        ctx
    }

    fn write_summary(&self, ctx: &GradingCtx, report: &Aggregator) {
        let mut lines = Vec::with_capacity(report.len() + 1);
        for (label, result) in report.sections() {
            lines.push(format!("{}: {}/{}", label, result.score(), result.max()));
        }
        lines.push(format!(
            "{} 总分: {}/{}",
            ctx,
            report.total_score(),
            report.total_max()
        ));

        for line in lines {
            if let Err(e) = append_log_line(&self.config.output_log_file, &line) {
                warn!("写入日志文件失败: {}", e);
                break;
            }
        }
    }
}

/// 读取可选的输入文件，读取失败只记录警告
async fn read_optional(path: Option<&PathBuf>, warnings: &mut Vec<String>) -> Option<String> {
    let path: &Path = path?;
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Some(text),
        Err(e) => {
            push_warning(warnings, format!("无法读取 {}: {}", path.display(), e));
            None
        }
    }
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    warn!("⚠️ {}", message);
    warnings.push(message);
}
