use auto_grade::models::grade::Outcome;
use auto_grade::services::{ResultStore, ResultsTable};
use auto_grade::{App, Config, OcrService, SectionResult};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio_test::assert_ok;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// 准备一套答案目录：选择 3 题、判断 2 题、词汇 2 题，外加写作评分标准
fn prepare_keys(root: &Path) -> PathBuf {
    let keys = root.join("answer_keys");
    write(
        &keys.join("mcq_part1.json"),
        r#"{"type": "mcq", "key": {"1": "A", "2": "B", "3": "C"}}"#,
    );
    write(
        &keys.join("tf_part1.json"),
        r#"{"type": "True/False", "key": {"4": true, "5": "F"}}"#,
    );
    write(
        &keys.join("vocab_part1.json"),
        r#"{"type": "vocabulary", "key": {"6": "apple", "7": "banana"}}"#,
    );
    write(
        &keys.join("writing_rubric.json"),
        r#"{"length": {"min": 5}, "keywords": ["because"], "max_score": 10}"#,
    );
    keys
}

fn config_for(root: &Path, keys: &Path, lines: Option<&str>) -> Config {
    let lines_file = lines.map(|content| {
        let path = root.join("ocr_lines.txt");
        write(&path, content);
        path
    });

    Config {
        answer_key_dir: keys.to_path_buf(),
        rubric_file: keys.join("writing_rubric.json"),
        results_dir: root.join("results"),
        lines_file,
        output_log_file: root.join("grading_log.txt").display().to_string(),
        ..Config::default()
    }
}

fn setup() -> (TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let keys = prepare_keys(tmp.path());
    (tmp, keys)
}

#[tokio::test]
async fn test_full_session_totals() {
    let (tmp, keys) = setup();
    let root = tmp.path();
    let config = config_for(
        root,
        &keys,
        Some("1. A\n2) B\n3 - d\n4: T\n5-true\n6. Apple\n7. bananna\nI go home.\n"),
    );

    let app = assert_ok!(App::initialize(config).await);
    let outcome = assert_ok!(app.run().await);
    let report = &outcome.report;

    let score = |label: &str| report.get(label).map(|r| (r.score(), r.max()));
    assert_eq!(score("mcq_part1"), Some((2, 3)));
    assert_eq!(score("tf_part1"), Some((1, 2)));
    assert_eq!(score("vocab_part1"), Some((2, 2)));
    // 全文以数字开头（−1），缺少关键词 because（−1）
    assert_eq!(score("writing"), Some((8, 10)));
    assert_eq!(
        report.get("writing").map(SectionResult::lines),
        Some(vec![
            "Missing keyword: because".to_string(),
            "Start with a capital letter.".to_string(),
        ])
    );

    assert_eq!(report.total_score(), 13);
    assert_eq!(report.total_max(), 17);
    assert!(outcome.saved.is_none());
    assert!(outcome.warnings.is_empty());

    let log = std::fs::read_to_string(root.join("grading_log.txt")).unwrap();
    assert!(log.contains("评分日志"));
    assert!(log.contains("mcq_part1: 2/3"));
}

#[tokio::test]
async fn test_malformed_key_is_skipped() {
    let (tmp, keys) = setup();
    let root = tmp.path();
    write(&keys.join("broken_part.json"), r#"{"type": "mcq", "key": "#);
    write(
        &keys.join("unknown_part.json"),
        r#"{"type": "essay_plus", "key": {"1": "A"}}"#,
    );
    let config = config_for(root, &keys, Some("1. A\n"));

    let app = assert_ok!(App::initialize(config).await);
    let outcome = assert_ok!(app.run().await);

    assert!(outcome.report.get("broken_part").is_none());
    assert!(outcome.report.get("unknown_part").is_none());
    assert_eq!(outcome.report.len(), 4);
    assert_eq!(outcome.report.get("mcq_part1").map(|r| r.score()), Some(1));
}

#[tokio::test]
async fn test_two_writing_sections_are_both_graded() {
    let (tmp, keys) = setup();
    let root = tmp.path();
    std::fs::remove_file(keys.join("writing_rubric.json")).unwrap();
    write(&keys.join("essay_a.json"), r#"{"type": "essay", "max_score": 10}"#);
    write(&keys.join("essay_b.json"), r#"{"type": "writing", "max_score": 5}"#);
    let config = config_for(root, &keys, Some("I stayed home.\n"));

    let app = assert_ok!(App::initialize(config).await);
    let outcome = assert_ok!(app.run().await);
    let report = &outcome.report;

    assert_eq!(report.get("essay_a").map(|r| r.max()), Some(10));
    assert_eq!(report.get("essay_b").map(|r| r.max()), Some(5));
    assert!(report.get("writing").is_none());
    assert_eq!(report.total_max(), 3 + 2 + 2 + 10 + 5);
}

#[tokio::test]
async fn test_missing_image_grades_blank_sheet() {
    let (tmp, keys) = setup();
    let root = tmp.path();
    let config = Config {
        image_path: Some(root.join("missing_sheet.png")),
        ..config_for(root, &keys, None)
    };

    let app = assert_ok!(App::with_engine(config.clone(), OcrService::from_config(&config)));
    let outcome = assert_ok!(app.run().await);

    assert!(outcome.sheet.lines.is_empty());
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("missing_sheet.png"));
    for (label, result) in outcome.report.sections() {
        match result {
            SectionResult::Graded { result, .. } => {
                assert_eq!(result.correct, 0, "{}", label);
                assert_eq!(result.count(Outcome::Missing), result.total, "{}", label);
            }
            SectionResult::Writing(_) => assert_eq!(label, "writing"),
        }
    }
}

#[tokio::test]
async fn test_results_are_persisted() {
    let (tmp, keys) = setup();
    let root = tmp.path();
    let config = Config {
        save_results: true,
        student_name: "Lan".to_string(),
        student_id: "S07".to_string(),
        ..config_for(root, &keys, Some("1. A\n2. B\n3. C\n"))
    };

    let app = assert_ok!(App::initialize(config.clone()).await);
    let first = assert_ok!(app.run().await);
    assert_ok!(app.run().await);

    let row = first.saved.unwrap();
    assert_eq!(row.student_name, "Lan");
    assert_eq!(row.student_id, "S07");
    assert_eq!(row.total_score, first.report.total_score());
    assert_eq!(row.max_score, 17);
    assert!(row.details_file.starts_with("Lan_S07_"));

    let store = ResultStore::new(&config.results_dir);
    let table: ResultsTable = assert_ok!(store.load_table().await);
    assert_eq!(table.rows.len(), 2);

    let details = std::fs::read_to_string(store.details_dir().join(&row.details_file)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&details).unwrap();
    assert_eq!(json["mcq_part1"]["score"], 3);
    assert_eq!(json["mcq_part1"]["details"][0], "Q1: ✔ A");
    assert!(json["writing"]["feedback"].is_array());
}

#[tokio::test]
async fn test_save_failure_keeps_report() {
    let (tmp, keys) = setup();
    let root = tmp.path();
    let blocker = root.join("results_blocked");
    write(&blocker, "not a directory");
    let config = Config {
        save_results: true,
        results_dir: blocker,
        ..config_for(root, &keys, Some("1. A\n2. B\n3. C\n"))
    };

    let app = assert_ok!(App::initialize(config).await);
    let outcome = assert_ok!(app.run().await);

    assert!(outcome.saved.is_none());
    assert_eq!(outcome.report.get("mcq_part1").map(|r| r.score()), Some(3));
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("保存成绩失败"));
}
