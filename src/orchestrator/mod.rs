//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次评分会话的调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! session::App (一次评分会话)
//!     ↓
//! workflow::SectionFlow (评分单个部分)
//!     ↓
//! parsing / grading (纯函数：解析、比对、汇总)
//!     ↓
//! services (能力层：OCR / 成绩保存)
//! ```
//!
//! ## 设计原则
//!
//! 1. **部分隔离**：任何一个部分的答案文件出错，都不影响其他部分
//! 2. **资源隔离**：只有编排层持有 OCR 服务和成绩存储
//! 3. **无业务逻辑**：只做调度和统计，不做具体评分判断

pub mod session;

// 重新导出主要类型
pub use session::{App, SessionOutcome};
