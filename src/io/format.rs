//! Matrix input format tags

/// Supported on-disk matrix formats, keyed by the short tags callers pass
/// to the loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixFormat {
    /// Whitespace-delimited `row col value` triples
    Tsv,

    /// Comma-delimited `row col value` triples
    Csv,

    /// MatrixMarket coordinate file
    MatrixMarket,

    /// Native row-fast structure archive
    Fsm,

    /// Native compressed-row archive
    Csr,
}

impl MatrixFormat {
    /// Resolve a format tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "tsv" => Some(MatrixFormat::Tsv),
            "csv" => Some(MatrixFormat::Csv),
            "mm" => Some(MatrixFormat::MatrixMarket),
            "fsm" => Some(MatrixFormat::Fsm),
            "csr" => Some(MatrixFormat::Csr),
            _ => None,
        }
    }

    /// The tag naming this format.
    pub fn tag(&self) -> &'static str {
        match self {
            MatrixFormat::Tsv => "tsv",
            MatrixFormat::Csv => "csv",
            MatrixFormat::MatrixMarket => "mm",
            MatrixFormat::Fsm => "fsm",
            MatrixFormat::Csr => "csr",
        }
    }
}
