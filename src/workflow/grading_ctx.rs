//! 评分上下文
//!
//! 封装"我正在给哪位学生评分、还有哪些手工输入"这一信息

use std::fmt::Display;

use crate::models::answer::AnswerMapping;
use crate::services::Student;

/// 评分上下文
///
/// 除答题卡 OCR 结果外，评分单个部分可能用到的其他输入
#[derive(Debug, Clone, Default)]
pub struct GradingCtx {
    /// 学生信息
    pub student: Student,

    /// 听力题的单独输入（已解析），没有时使用答题卡的填空解析结果
    pub listening: Option<AnswerMapping>,

    /// 写作题的单独输入，没有时使用答题卡全文
    pub writing_text: Option<String>,
}

impl GradingCtx {
    /// 创建新的评分上下文
    pub fn new(student: Student) -> Self {
        Self {
            student,
            ..Default::default()
        }
    }

    pub fn with_listening(mut self, listening: AnswerMapping) -> Self {
        self.listening = Some(listening);
        self
    }

    pub fn with_writing_text(mut self, text: impl Into<String>) -> Self {
        self.writing_text = Some(text.into());
        self
    }
}

impl Display for GradingCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[学生 {} 学号#{}]",
            if self.student.name.is_empty() { "未填写" } else { &self.student.name },
            if self.student.id.is_empty() { "-" } else { &self.student.id }
        )
    }
}
