use heapsqueeze_hprof::HprofError;

/// Fatal analysis error. Every variant aborts the run without a report.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Hprof(#[from] HprofError),

    /// An instance appeared before the text class was defined.
    #[error("instance 0x{instance:x} appears before class {class} was discovered")]
    OrderingViolation { class: String, instance: u64 },

    #[error("class {0} has no reference field")]
    NoReferenceField(String),

    #[error("unsupported reference width: {0} (expected 4 or 8)")]
    UnsupportedReferenceWidth(usize),

    #[error("instance 0x{0:x} is too short to hold its backing array reference")]
    ShortInstance(u64),

    #[error("nothing to compare against: total footprint is zero under {model}")]
    EmptyFootprint { model: String },

    #[error("class {0} not found in heap dump")]
    ClassNotFound(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
