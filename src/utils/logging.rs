use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志（`RUST_LOG` 未设置时默认 info）
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n评分日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 向日志文件追加一行
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(answer_key_dir: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 答题卡自动评分");
    info!("📁 答案目录: {}", answer_key_dir);
    info!("{}", "=".repeat(60));
}

/// 记录评分部分加载信息
///
/// # 参数
/// - `total`: 已加载的部分数量
pub fn log_sections_loaded(total: usize) {
    info!("✓ 找到 {} 个评分部分", total);
}

/// 记录 OCR 结果
///
/// # 参数
/// - `lines`: 识别出的文本行
/// - `verbose`: 是否逐行输出
pub fn log_ocr_lines(lines: &[String], verbose: bool) {
    info!("🔍 OCR 识别出 {} 行文本", lines.len());
    if verbose {
        for line in lines {
            info!("   | {}", truncate_text(line, 80));
        }
    }
}

/// 打印最终得分
///
/// # 参数
/// - `total_score`: 总得分
/// - `total_max`: 总满分
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(total_score: i64, total_max: i64, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 评分完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 总分: {} / {}", total_score, total_max);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
