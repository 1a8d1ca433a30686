// Error taxonomy shared by every stage of the pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// The team code is not in the registry. Raised before any fetch.
    #[error("unknown team code: {code}")]
    UnknownTeam { code: String },

    /// An external collaborator was unreachable or returned malformed data.
    #[error("data source `{source_name}` failed: {message}")]
    DataSource {
        source_name: String,
        message: String,
    },

    /// A single input value could not be parsed.
    #[error("could not parse `{input}`: {message}")]
    Parse { input: String, message: String },
}

impl SimulationError {
    pub fn data_source(source_name: impl Into<String>, message: impl ToString) -> Self {
        SimulationError::DataSource {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}
