//! Locale content: typed nodes, the per-locale table and its audit.
mod audit;
mod error;
mod node;
mod records;
mod table;

pub use audit::{
    AuditReport,
    ContentIssue,
    IssueKind,
    LocaleCoverage,
    Severity,
};
pub use error::ContentError;
pub use node::{
    ContentNode,
    ContentTree,
    NodeKind,
};
pub use records::{
    FaqEntry,
    Feature,
    PricingTier,
    RecordList,
    RecordShape,
    Stat,
    Testimonial,
};
pub use table::{
    ContentSource,
    ContentTable,
};
