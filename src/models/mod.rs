pub mod answer;
pub mod grade;
pub mod loaders;
pub mod rubric;
pub mod section;

pub use answer::{canonical_true_false, AnswerKey, AnswerMapping, QuestionNumber};
pub use grade::{GradeResult, Outcome, SectionResult, Verdict, WritingResult};
pub use loaders::{load_all_sections, load_rubric, LoadedSection, SectionConfig};
pub use rubric::Rubric;
pub use section::SectionKind;
