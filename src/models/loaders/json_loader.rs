use crate::error::FileError;
use crate::models::answer::AnswerKey;
use crate::models::rubric::Rubric;
use crate::models::section::SectionKind;
use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 单个评分部分的配置
#[derive(Debug, Clone, PartialEq)]
pub enum SectionConfig {
    /// 带标准答案的部分（选择 / 判断 / 填空 / 匹配 / 词汇 / 听力）
    Keyed(AnswerKey),
    /// 写作部分
    Writing(Rubric),
}

impl SectionConfig {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionConfig::Keyed(key) => key.kind,
            SectionConfig::Writing(_) => SectionKind::Writing,
        }
    }
}

/// 已加载的评分部分（标签取自文件名）
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSection {
    pub label: String,
    pub config: SectionConfig,
}

/// 单独评分标准文件（`rubric_path`）对应部分的标签
pub const WRITING_LABEL: &str = "writing";

/// 从 JSON 文件加载一个评分部分
///
/// `type` 为 writing / essay 时按评分标准解析，其余按答案映射解析
pub async fn load_section_file(path: &Path) -> Result<LoadedSection> {
    let value = read_json(path).await?;

    let is_writing = value
        .get("type")
        .and_then(JsonValue::as_str)
        .and_then(SectionKind::parse)
        == Some(SectionKind::Writing);

    let config = if is_writing {
        let rubric: Rubric = serde_json::from_value(value)
            .with_context(|| format!("无法解析评分标准: {}", path.display()))?;
        SectionConfig::Writing(rubric)
    } else {
        let key: AnswerKey = serde_json::from_value(value)
            .with_context(|| format!("无法解析答案文件: {}", path.display()))?;
        SectionConfig::Keyed(key)
    };

    Ok(LoadedSection {
        label: section_label(path),
        config,
    })
}

/// 加载写作评分标准（可以没有 `type` 字段）
pub async fn load_rubric(path: &Path) -> Result<Rubric> {
    let value = read_json(path).await?;
    let rubric = serde_json::from_value(value)
        .with_context(|| format!("无法解析评分标准: {}", path.display()))?;
    Ok(rubric)
}

/// 从文件夹中加载所有评分部分
///
/// 单个文件解析失败只记录警告并跳过，不影响其他部分。
/// `rubric_path` 指向的文件按评分标准加载（即使它不在文件夹内）。
pub async fn load_all_sections(
    folder_path: &Path,
    rubric_path: Option<&Path>,
) -> Result<Vec<LoadedSection>> {
    let mut sections = Vec::new();
    let mut rubric_seen = false;

    if folder_path.exists() {
        let mut files = Vec::new();
        let mut entries = fs::read_dir(folder_path)
            .await
            .with_context(|| format!("无法读取文件夹: {}", folder_path.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                files.push(path);
            }
        }
        // 按文件名排序，保证每次加载顺序一致
        files.sort();

        for path in files {
            tracing::info!(
                "正在加载: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );

            if is_same_file(&path, rubric_path) {
                rubric_seen = true;
                push_rubric(&mut sections, &path).await;
                continue;
            }

            match load_section_file(&path).await {
                Ok(section) => {
                    tracing::info!(
                        "成功加载 {} ({})",
                        section.label,
                        section.config.kind()
                    );
                    sections.push(section);
                }
                Err(e) => {
                    tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
                }
            }
        }
    } else {
        tracing::warn!("答案文件夹不存在: {}", folder_path.display());
    }

    if let Some(rubric_path) = rubric_path {
        if !rubric_seen && rubric_path.exists() {
            push_rubric(&mut sections, rubric_path).await;
        }
    }

    Ok(sections)
}

async fn push_rubric(sections: &mut Vec<LoadedSection>, path: &Path) {
    match load_rubric(path).await {
        Ok(rubric) => {
            tracing::info!("成功加载写作评分标准 (满分 {})", rubric.max_score);
            if let Some(pos) = sections.iter().position(|s| s.label == WRITING_LABEL) {
                tracing::warn!(
                    "⚠️ 评分标准 {} 与已加载的 {} 部分同名，以评分标准为准",
                    path.display(),
                    WRITING_LABEL
                );
                sections.remove(pos);
            }
            sections.push(LoadedSection {
                label: WRITING_LABEL.to_string(),
                config: SectionConfig::Writing(rubric),
            });
        }
        Err(e) => {
            tracing::warn!("加载评分标准失败 {}: {:#}", path.display(), e);
        }
    }
}

async fn read_json(path: &Path) -> Result<JsonValue> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| FileError::read_failed(path.display().to_string(), e))?;

    let value = serde_json::from_str(&content).map_err(|e| FileError::JsonParseFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(value)
}

fn section_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_same_file(path: &Path, other: Option<&Path>) -> bool {
    let Some(other) = other else {
        return false;
    };
    let canonical = |p: &Path| -> PathBuf { p.canonicalize().unwrap_or_else(|_| p.to_path_buf()) };
    canonical(path) == canonical(other)
}
