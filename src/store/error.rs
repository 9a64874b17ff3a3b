use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Database connection is not configured. Set DATABASE_URL to a valid connection string.")]
    NotConfigured,

    #[error("An error occurred while connecting to the database")]
    Connect(#[source] tokio_postgres::Error),

    #[error("Query against table '{table}' failed")]
    Execute {
        table: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("Failed to decode column '{column}' of the query result")]
    Decode {
        column: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("Failed building a DataFrame from the query result")]
    Frame(#[source] PolarsError),

    #[error("No in-memory frame registered for table '{0}'")]
    MissingTable(String),

    #[error("'{0}' is not a valid table name")]
    InvalidTableName(String),

    #[error("Column '{column}' has type {dtype}, which cannot be written to the store")]
    UnsupportedColumnType { column: String, dtype: String },

    #[error("Appending to table '{table}' failed")]
    Append {
        table: String,
        #[source]
        source: tokio_postgres::Error,
    },
}
