use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The spreadsheet could not be fetched at all.
    #[error("Data source unavailable: {0}")]
    SourceUnavailable(String),

    /// The fetch worked but the sheet has no data rows.
    #[error("The data source returned no rows")]
    EmptyResult,

    #[error("Unreadable sheet structure: {0}")]
    UnreadableStructure(String),

    #[error("CSV parsing system error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

impl EngineError {
    /// Message shown to the person looking at the report.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::SourceUnavailable(msg) => format!("Could not load the rental sheet: {}", msg),
            EngineError::EmptyResult => "No data: the rental sheet is empty.".to_string(),
            EngineError::UnreadableStructure(msg) => format!("The rental sheet could not be read: {}", msg),
            EngineError::Csv { source } => format!("The rental sheet could not be read: {}", source),
            EngineError::Config(msg) => format!("Invalid configuration: {}", msg),
        }
    }

    /// Whether the consumer should render a warning rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, EngineError::EmptyResult)
    }
}
