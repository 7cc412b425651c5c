use thiserror::Error;

use crate::models::answer::QuestionNumber;
use crate::models::section::SectionKind;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// OCR 相关错误
    #[error("OCR错误: {0}")]
    Ocr(#[from] OcrError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 答案文件内容错误
    #[error("答案错误: {0}")]
    Key(#[from] KeyError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// OCR 调用错误
///
/// OCR 失败不会中止评分，只会让本次识别结果为空
#[derive(Debug, Error)]
pub enum OcrError {
    /// 无法启动 OCR 进程
    #[error("无法启动 OCR 进程 ({program}): {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// OCR 进程非正常退出
    #[error("OCR 进程执行失败: {stderr}")]
    ProcessFailed { stderr: String },
    /// OCR 输出无法解析
    #[error("无法解析 OCR 输出: {source}")]
    OutputParseFailed {
        #[source]
        source: serde_json::Error,
    },
    /// 图片不存在
    #[error("图片不存在: {path}")]
    ImageNotFound { path: String },
    /// 已识别文本文件读取失败
    #[error("无法读取识别文本 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// TOML 序列化失败
    #[error("TOML序列化失败 ({path}): {source}")]
    TomlWriteFailed {
        path: String,
        #[source]
        source: toml::ser::Error,
    },
    /// JSON 序列化失败
    #[error("JSON序列化失败 ({path}): {source}")]
    JsonWriteFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 答案文件内容错误
#[derive(Debug, Error)]
pub enum KeyError {
    /// 题号不是 1–3 位正整数
    #[error("无效题号: '{raw}'")]
    InvalidQuestionNumber { raw: String },
    /// 答案值无法使用
    #[error("题目 {question} 的答案无效: {value}")]
    InvalidAnswer {
        question: QuestionNumber,
        value: String,
    },
    /// 该题型不使用答案映射
    #[error("题型 {kind} 不能使用答案映射")]
    UnsupportedKind { kind: SectionKind },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 相似度阈值超出 [0, 1]
    #[error("相似度阈值 {value} 超出范围 [0, 1]")]
    ThresholdOutOfRange { value: f64 },
    /// 正则表达式编译失败
    #[error("正则表达式编译失败 ({pattern}): {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// ========== 便捷构造函数 ==========

impl FileError {
    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        FileError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        FileError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
