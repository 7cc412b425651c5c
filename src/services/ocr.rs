//! OCR 服务 - 业务能力层
//!
//! 只负责"把图片变成文本行"的能力。OCR 引擎本身是外部进程，
//! 本模块只定义调用约定：输入图片路径，输出按位置排序的文本片段。

use crate::config::Config;
use crate::error::OcrError;
use serde::Deserialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// OCR 能力
///
/// 要么返回完整的文本片段列表（可能为空），要么整体失败，没有部分结果
pub trait OcrEngine {
    fn recognize(&self, image: &Path)
        -> impl Future<Output = Result<Vec<String>, OcrError>> + Send;
}

/// OCR 进程输出的单个片段
///
/// 兼容纯字符串和带 `text` 字段的对象两种格式
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OcrFragment {
    Text(String),
    Token { text: String },
}

impl OcrFragment {
    fn into_text(self) -> String {
        match self {
            OcrFragment::Text(text) | OcrFragment::Token { text } => text,
        }
    }
}

/// 调用外部 OCR 脚本
///
/// 执行 `<program> <script> --image <path> --lang <lang>`，
/// 脚本在 stdout 输出 JSON 数组
#[derive(Debug, Clone)]
pub struct CommandOcr {
    program: String,
    script_path: PathBuf,
    lang: String,
}

impl CommandOcr {
    pub fn new(program: impl Into<String>, script_path: PathBuf) -> Self {
        Self {
            program: program.into(),
            script_path,
            lang: "en".to_string(),
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// 解析 OCR 脚本的输出
    pub fn parse_output(stdout: &str) -> Result<Vec<String>, OcrError> {
        let fragments: Vec<OcrFragment> = serde_json::from_str(stdout.trim())
            .map_err(|source| OcrError::OutputParseFailed { source })?;
        Ok(fragments.into_iter().map(OcrFragment::into_text).collect())
    }
}

impl OcrEngine for CommandOcr {
    async fn recognize(&self, image: &Path) -> Result<Vec<String>, OcrError> {
        if !image.exists() {
            return Err(OcrError::ImageNotFound {
                path: image.display().to_string(),
            });
        }

        debug!("调用 OCR: {} {}", self.program, self.script_path.display());

        // 调用方丢弃 future 时结束子进程
        let output = Command::new(&self.program)
            .arg(&self.script_path)
            .arg("--image")
            .arg(image)
            .arg("--lang")
            .arg(&self.lang)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| OcrError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(OcrError::ProcessFailed { stderr });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_output(&stdout)
    }
}

/// 已识别好的文本文件（每行一个片段）
///
/// 用于离线重评分或由其他工具完成 OCR 的场景，忽略图片路径
#[derive(Debug, Clone)]
pub struct LinesFileOcr {
    path: PathBuf,
}

impl LinesFileOcr {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl OcrEngine for LinesFileOcr {
    async fn recognize(&self, _image: &Path) -> Result<Vec<String>, OcrError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| OcrError::ReadFailed {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

/// 根据配置选择的 OCR 服务
#[derive(Debug, Clone)]
pub enum OcrService {
    Command(CommandOcr),
    LinesFile(LinesFileOcr),
}

impl OcrService {
    /// 配置了 `lines_file` 时直接读取文本，否则调用外部 OCR 脚本
    pub fn from_config(config: &Config) -> Self {
        match &config.lines_file {
            Some(path) => OcrService::LinesFile(LinesFileOcr::new(path.clone())),
            None => OcrService::Command(
                CommandOcr::new(config.ocr_program.clone(), config.ocr_script.clone())
                    .with_lang(config.ocr_lang.clone()),
            ),
        }
    }

    /// 是否需要图片
    pub fn needs_image(&self) -> bool {
        matches!(self, OcrService::Command(_))
    }
}

impl OcrEngine for OcrService {
    async fn recognize(&self, image: &Path) -> Result<Vec<String>, OcrError> {
        match self {
            OcrService::Command(engine) => engine.recognize(image).await,
            OcrService::LinesFile(engine) => engine.recognize(image).await,
        }
    }
}
