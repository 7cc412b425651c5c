//! 成绩保存服务 - 业务能力层
//!
//! 只负责"保存一次评分结果"的能力：
//! - 在 `student_results.toml` 末尾追加一行汇总
//! - 在 `details/` 下写一份逐题明细 JSON
//!
//! 汇总表采用"读取全部 → 追加一行 → 整体写回"，默认同一时间只有一个写入者。

use crate::error::{AppResult, FileError};
use crate::grading::Aggregator;
use crate::models::grade::SectionResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// 汇总表文件名
pub const RESULTS_FILE: &str = "student_results.toml";
/// 明细目录名
pub const DETAILS_DIR: &str = "details";

/// 汇总表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub student_id: String,
    pub student_name: String,
    pub date: String,
    pub total_score: i64,
    pub max_score: i64,
    pub details_file: String,
}

/// 汇总表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsTable {
    #[serde(default)]
    pub rows: Vec<ResultRow>,
}

/// 明细记录中的一个部分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionDetail {
    Graded {
        score: i64,
        max: i64,
        details: Vec<String>,
    },
    Writing {
        score: i64,
        max: i64,
        feedback: Vec<String>,
    },
}

impl From<&SectionResult> for SectionDetail {
    fn from(result: &SectionResult) -> Self {
        match result {
            SectionResult::Graded { .. } => SectionDetail::Graded {
                score: result.score(),
                max: result.max(),
                details: result.lines(),
            },
            SectionResult::Writing(_) => SectionDetail::Writing {
                score: result.score(),
                max: result.max(),
                feedback: result.lines(),
            },
        }
    }
}

/// 学生信息
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Student {
    pub name: String,
    pub id: String,
}

impl Student {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    /// 明细文件名：`<姓名>_<学号>_<日期>.json`，缺省为 unknown / id
    pub fn details_file_name(&self, date: NaiveDate) -> String {
        let name = non_empty_or(&self.name, "unknown");
        let id = non_empty_or(&self.id, "id");
        format!(
            "{}_{}_{}.json",
            sanitize(name),
            sanitize(id),
            date.format("%Y-%m-%d")
        )
    }
}

/// 成绩保存服务
pub struct ResultStore {
    results_dir: PathBuf,
}

impl ResultStore {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    pub fn results_path(&self) -> PathBuf {
        self.results_dir.join(RESULTS_FILE)
    }

    pub fn details_dir(&self) -> PathBuf {
        self.results_dir.join(DETAILS_DIR)
    }

    /// 保存一次评分结果
    ///
    /// # 返回
    /// 返回追加到汇总表中的那一行
    pub async fn save(
        &self,
        student: &Student,
        report: &Aggregator,
        date: NaiveDate,
    ) -> AppResult<ResultRow> {
        let details_file = student.details_file_name(date);
        self.write_details(&details_file, report).await?;

        let row = ResultRow {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            date: date.format("%Y-%m-%d").to_string(),
            total_score: report.total_score(),
            max_score: report.total_max(),
            details_file,
        };

        let mut table = self.load_table().await?;
        table.rows.push(row.clone());
        self.write_table(&table).await?;

        info!(
            "💾 成绩已保存: {} (共 {} 条记录)",
            self.results_path().display(),
            table.rows.len()
        );
        Ok(row)
    }

    /// 读取汇总表，文件不存在时返回空表
    pub async fn load_table(&self) -> AppResult<ResultsTable> {
        let path = self.results_path();
        if !path.exists() {
            return Ok(ResultsTable::default());
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| FileError::read_failed(path.display().to_string(), e))?;

        let table = toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(table)
    }

    async fn write_table(&self, table: &ResultsTable) -> AppResult<()> {
        let path = self.results_path();
        let content = toml::to_string(table).map_err(|source| FileError::TomlWriteFailed {
            path: path.display().to_string(),
            source,
        })?;
        write_file(&path, &content).await
    }

    async fn write_details(&self, file_name: &str, report: &Aggregator) -> AppResult<()> {
        let details: BTreeMap<&str, SectionDetail> = report
            .sections()
            .iter()
            .map(|(label, result)| (label.as_str(), SectionDetail::from(result)))
            .collect();

        let path = self.details_dir().join(file_name);
        let content =
            serde_json::to_string_pretty(&details).map_err(|source| FileError::JsonWriteFailed {
                path: path.display().to_string(),
                source,
            })?;
        write_file(&path, &content).await?;

        debug!("明细已写入: {}", path.display());
        Ok(())
    }
}

async fn write_file(path: &Path, content: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| FileError::write_failed(parent.display().to_string(), e))?;
    }
    fs::write(path, content)
        .await
        .map_err(|e| FileError::write_failed(path.display().to_string(), e))?;
    Ok(())
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value.trim()
    }
}

/// 去掉文件名中不能使用的字符
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::grade::{GradeResult, Verdict, WritingResult};
    use crate::models::section::SectionKind;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn sample_report() -> Aggregator {
        let mut graded = GradeResult::default();
        graded.push(Verdict::Correct {
            question: 1,
            actual: "A".into(),
            expected: "A".into(),
            similarity: None,
        });
        graded.push(Verdict::Missing {
            question: 2,
            expected: "B".into(),
        });

        let mut report = Aggregator::new();
        report.record("mcq_part1", SectionResult::graded(SectionKind::Mcq, graded));
        report.record(
            "writing",
            SectionResult::Writing(WritingResult {
                score: 7,
                max: 10,
                feedback: vec!["Too short.".into()],
            }),
        );
        report
    }

    #[test]
    fn test_details_file_name() {
        assert_eq!(
            Student::new("Lan Anh", "S01").details_file_name(date()),
            "Lan Anh_S01_2025-03-14.json"
        );
        assert_eq!(
            Student::default().details_file_name(date()),
            "unknown_id_2025-03-14.json"
        );
        assert_eq!(
            Student::new("a/b", "").details_file_name(date()),
            "a_b_id_2025-03-14.json"
        );
    }

    #[tokio::test]
    async fn test_save_appends_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResultStore::new(tmp.path().join("results"));
        let report = sample_report();

        let first = store
            .save(&Student::new("Minh", "1"), &report, date())
            .await
            .unwrap();
        store
            .save(&Student::new("Hoa", "2"), &report, date())
            .await
            .unwrap();

        assert_eq!(first.total_score, 8);
        assert_eq!(first.max_score, 12);

        let table = store.load_table().await.unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], first);
        assert_eq!(table.rows[1].student_name, "Hoa");

        let details = std::fs::read_to_string(store.details_dir().join(&first.details_file)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&details).unwrap();
        assert_eq!(json["mcq_part1"]["score"], 1);
        assert_eq!(json["mcq_part1"]["max"], 2);
        assert_eq!(json["mcq_part1"]["details"][1], "Q2: No answer (expected B)");
        assert_eq!(json["writing"]["feedback"][0], "Too short.");
    }

    #[tokio::test]
    async fn test_save_reports_write_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("results");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = ResultStore::new(&blocker);
        let err = store
            .save(&Student::default(), &sample_report(), date())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::File(FileError::WriteFailed { .. })));
    }
}
