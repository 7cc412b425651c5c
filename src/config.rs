use std::path::PathBuf;

use crate::grading::DEFAULT_THRESHOLD;
use crate::parsing::McqStrategy;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 答案文件目录
    pub answer_key_dir: PathBuf,
    /// 写作评分标准文件
    pub rubric_file: PathBuf,
    /// 成绩保存目录
    pub results_dir: PathBuf,
    /// 答题卡图片
    pub image_path: Option<PathBuf>,
    /// 已识别的文本文件（设置后不再调用 OCR）
    pub lines_file: Option<PathBuf>,
    /// 写作题的单独文本
    pub writing_text_file: Option<PathBuf>,
    /// 听力题的单独答案（每行一题，如 `1 apple`）
    pub listening_file: Option<PathBuf>,
    // --- OCR 配置 ---
    pub ocr_program: String,
    pub ocr_script: PathBuf,
    pub ocr_lang: String,
    // --- 评分配置 ---
    /// 填空类题目的相似度阈值
    pub fill_threshold: f64,
    /// 选择题只采用每行第一个命中的格式
    pub mcq_first_shape_only: bool,
    // --- 学生信息 ---
    pub student_name: String,
    pub student_id: String,
    /// 是否保存成绩
    pub save_results: bool,
    /// 是否显示逐题明细
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            answer_key_dir: PathBuf::from("answer_keys"),
            rubric_file: PathBuf::from("answer_keys/writing_rubric.json"),
            results_dir: PathBuf::from("results"),
            image_path: None,
            lines_file: None,
            writing_text_file: None,
            listening_file: None,
            ocr_program: "python3".to_string(),
            ocr_script: PathBuf::from("ocr/ocr_bridge.py"),
            ocr_lang: "en".to_string(),
            fill_threshold: DEFAULT_THRESHOLD,
            mcq_first_shape_only: false,
            student_name: String::new(),
            student_id: String::new(),
            save_results: false,
            verbose_logging: false,
            output_log_file: "grading_log.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            answer_key_dir: env_path("ANSWER_KEY_DIR").unwrap_or(default.answer_key_dir),
            rubric_file: env_path("RUBRIC_FILE").unwrap_or(default.rubric_file),
            results_dir: env_path("RESULTS_DIR").unwrap_or(default.results_dir),
            image_path: env_path("IMAGE_PATH").or(default.image_path),
            lines_file: env_path("LINES_FILE").or(default.lines_file),
            writing_text_file: env_path("WRITING_TEXT_FILE").or(default.writing_text_file),
            listening_file: env_path("LISTENING_FILE").or(default.listening_file),
            ocr_program: std::env::var("OCR_PROGRAM").unwrap_or(default.ocr_program),
            ocr_script: env_path("OCR_SCRIPT").unwrap_or(default.ocr_script),
            ocr_lang: std::env::var("OCR_LANG").unwrap_or(default.ocr_lang),
            fill_threshold: std::env::var("FILL_THRESHOLD").ok().and_then(|v| v.parse().ok()).unwrap_or(default.fill_threshold),
            mcq_first_shape_only: std::env::var("MCQ_FIRST_SHAPE_ONLY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.mcq_first_shape_only),
            student_name: std::env::var("STUDENT_NAME").unwrap_or(default.student_name),
            student_id: std::env::var("STUDENT_ID").unwrap_or(default.student_id),
            save_results: std::env::var("SAVE_RESULTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.save_results),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 选择题解析策略
    pub fn mcq_strategy(&self) -> McqStrategy {
        if self.mcq_first_shape_only {
            McqStrategy::FirstShape
        } else {
            McqStrategy::AllShapes
        }
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
