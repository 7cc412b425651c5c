pub mod grading_ctx;
pub mod section_flow;

pub use grading_ctx::GradingCtx;
pub use section_flow::SectionFlow;
