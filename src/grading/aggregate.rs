use std::collections::BTreeMap;

use tracing::warn;

use crate::models::grade::SectionResult;

/// 各部分得分汇总
///
/// 部分之间互不影响；同一标签重复记录时以最后一次为准，总分同步修正
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregator {
    sections: BTreeMap<String, SectionResult>,
    total_score: i64,
    total_max: i64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个部分的结果
    pub fn record(&mut self, label: impl Into<String>, result: SectionResult) {
        let label = label.into();
        self.total_score += result.score();
        self.total_max += result.max();

        if let Some(previous) = self.sections.insert(label.clone(), result) {
            warn!("⚠️ 部分 {} 被重复记录，替换旧结果", label);
            self.total_score -= previous.score();
            self.total_max -= previous.max();
        }
    }

    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    pub fn total_max(&self) -> i64 {
        self.total_max
    }

    pub fn get(&self, label: &str) -> Option<&SectionResult> {
        self.sections.get(label)
    }

    /// 按标签排序的全部结果
    pub fn sections(&self) -> &BTreeMap<String, SectionResult> {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grade::{GradeResult, WritingResult};
    use crate::models::section::SectionKind;

    fn graded(correct: usize, total: usize) -> SectionResult {
        SectionResult::graded(
            SectionKind::Mcq,
            GradeResult {
                correct,
                total,
                verdicts: Vec::new(),
            },
        )
    }

    #[test]
    fn test_totals_independent_of_order() {
        let parts = [("a", graded(2, 3)), ("b", graded(5, 5)), ("c", graded(0, 2))];

        let mut forward = Aggregator::new();
        for (label, result) in parts.iter().cloned() {
            forward.record(label, result);
        }

        let mut backward = Aggregator::new();
        for (label, result) in parts.iter().rev().cloned() {
            backward.record(label, result);
        }

        assert_eq!(forward.total_score(), 7);
        assert_eq!(forward.total_max(), 10);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_writing_section_counts() {
        let mut agg = Aggregator::new();
        agg.record("mcq_part1", graded(3, 4));
        agg.record(
            "writing",
            SectionResult::Writing(WritingResult {
                score: 7,
                max: 10,
                feedback: vec![],
            }),
        );
        assert_eq!((agg.total_score(), agg.total_max()), (10, 14));
        assert_eq!(agg.len(), 2);
    }

    #[test]
    fn test_relabel_replaces_previous() {
        let mut agg = Aggregator::new();
        agg.record("mcq", graded(1, 5));
        agg.record("mcq", graded(4, 5));
        assert_eq!((agg.total_score(), agg.total_max()), (4, 5));
        assert_eq!(agg.get("mcq").map(SectionResult::score), Some(4));
    }

    #[test]
    fn test_empty() {
        let agg = Aggregator::new();
        assert!(agg.is_empty());
        assert_eq!((agg.total_score(), agg.total_max()), (0, 0));
    }
}
