// Export modules for library usage
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod core;
pub mod errors;
pub mod flow;
pub mod io;
pub mod priority;
pub mod report;
pub mod scoring;
pub mod session;

// Re-export commonly used types
pub use crate::catalog::{split_category_label, Catalog};
pub use crate::core::{
    function_label, function_tag, Answer, AnswerStore, CategoryStat, FunctionStat, Question,
    FUNCTION_ORDER,
};
pub use crate::errors::{FormatError, LoadError};
pub use crate::flow::{Advance, AssessmentSession, FlowError, FlowState};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::priority::{
    select_top_weak_categories, select_unassessed_categories, DEFAULT_TOP_N,
};
pub use crate::report::{
    build_report, build_summary, group_low_maturity, group_unanswered, AssessmentReport,
    MaturityLevel, RecommendedAction, ReportDocument, Summary,
};
pub use crate::scoring::{
    compute_category_stats, compute_function_stats, compute_radar_values, maturity_score,
};
pub use crate::session::{
    import_session, serialize_session, SessionDocument, SessionImport, SESSION_KIND,
    SESSION_VERSION,
};
