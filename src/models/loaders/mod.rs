pub mod json_loader;

pub use json_loader::{
    load_all_sections, load_rubric, load_section_file, LoadedSection, SectionConfig,
    WRITING_LABEL,
};
