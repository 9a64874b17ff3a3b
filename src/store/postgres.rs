//! The Postgres-backed data access object.

use crate::store::error::QueryError;
use crate::store::frame::rows_to_frame;
use crate::store::query::ObservationQuery;
use crate::store::ObservationSource;
use crate::types::frequency::Frequency;
use chrono::{Duration, NaiveDate};
use log::{debug, error, info, warn};
use polars::prelude::*;
use std::error::Error;
use tokio::task::JoinHandle;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, Config, NoTls};

/// Table receiving bulk appends when no other table is named.
pub const DEFAULT_APPEND_TABLE: &str = "rainfall_data";

type SqlValue = Box<dyn ToSql + Sync + Send>;

/// Data access object for the rainfall observation tables.
///
/// The store only holds the parsed connection settings. Every call opens its
/// own [`StoreSession`] and closes it before returning, so no connection
/// outlives a query.
///
/// A store created from a missing or unparsable connection string stays in a
/// failed state: it never attempts to connect, and every query logs
/// [`QueryError::NotConfigured`] and yields no data.
#[derive(Debug, Clone)]
pub struct RainfallStore {
    config: Option<Config>,
}

impl RainfallStore {
    pub fn new(database_url: Option<&str>) -> Self {
        let config = match database_url {
            None => {
                error!("No database connection string provided; queries will return no data.");
                None
            }
            Some(url) => match url.parse::<Config>() {
                Ok(config) => {
                    info!("Database connection settings loaded.");
                    Some(config)
                }
                Err(e) => {
                    error!("An error occurred while reading the database connection string: {}", e);
                    None
                }
            },
        };
        Self { config }
    }

    /// Whether the store holds usable connection settings.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Opens a scoped connection. Callers must [`StoreSession::close`] it.
    pub async fn open(&self) -> Result<StoreSession, QueryError> {
        let config = self.config.as_ref().ok_or(QueryError::NotConfigured)?;
        let (client, connection) = config.connect(NoTls).await.map_err(QueryError::Connect)?;
        let connection = tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!("Database connection closed with an error: {}", e);
            }
        });
        debug!("Opened database session");
        Ok(StoreSession { client, connection })
    }

    /// Fetches observations for `date` at `frequency`, reporting why a fetch failed.
    pub async fn try_query_table(
        &self,
        date: NaiveDate,
        frequency: Frequency,
    ) -> Result<DataFrame, QueryError> {
        let query = ObservationQuery::for_date(date, frequency);
        let session = self.open().await?;
        let result = session.fetch(&query).await;
        session.close().await;
        result
    }

    /// Appends every row of `frame` to `table_name`, reporting the row count.
    ///
    /// All rows are written in one transaction. The column set is taken from
    /// the frame; the store enforces whatever schema the table has.
    pub async fn try_store_data(
        &self,
        frame: &DataFrame,
        table_name: &str,
    ) -> Result<u64, QueryError> {
        let mut session = self.open().await?;
        let result = session.append(frame, table_name).await;
        session.close().await;
        result
    }

    /// Best-effort append of `frame` to `table_name`; failures are only logged.
    pub async fn store_data(&self, frame: &DataFrame, table_name: &str) {
        match self.try_store_data(frame, table_name).await {
            Ok(rows) => info!("Data successfully stored in {} table ({} rows).", table_name, rows),
            Err(e) => error!("An error occurred while storing data: {}", describe(&e)),
        }
    }
}

impl ObservationSource for RainfallStore {
    async fn query_table(&self, date: NaiveDate, frequency: Frequency) -> Option<DataFrame> {
        match self.try_query_table(date, frequency).await {
            Ok(frame) => Some(frame),
            Err(e) => {
                error!("An error occurred while querying data: {}", describe(&e));
                None
            }
        }
    }
}

/// One open connection, released by [`StoreSession::close`].
///
/// Dropping a session without closing it also ends the connection, since the
/// background connection task finishes once its client is gone.
pub struct StoreSession {
    client: Client,
    connection: JoinHandle<()>,
}

impl StoreSession {
    pub async fn fetch(&self, query: &ObservationQuery) -> Result<DataFrame, QueryError> {
        let rows = self
            .client
            .query(query.sql(), &query.bind())
            .await
            .map_err(|e| QueryError::Execute {
                table: query.table_name().to_string(),
                source: e,
            })?;
        info!(
            "Query on {} for {} returned {} rows",
            query.table_name(),
            query.reference(),
            rows.len()
        );
        rows_to_frame(&rows, query.frequency())
    }

    pub async fn append(&mut self, frame: &DataFrame, table_name: &str) -> Result<u64, QueryError> {
        let statement_sql = insert_statement(frame, table_name)?;
        let columns = frame
            .get_columns()
            .iter()
            .map(column_values)
            .collect::<Result<Vec<_>, _>>()?;

        let append_error = |source| QueryError::Append {
            table: table_name.to_string(),
            source,
        };
        let transaction = self.client.transaction().await.map_err(append_error)?;
        let statement = transaction
            .prepare(&statement_sql)
            .await
            .map_err(append_error)?;

        let mut written = 0;
        for row in 0..frame.height() {
            let params: Vec<&(dyn ToSql + Sync)> = columns
                .iter()
                .map(|values| &*values[row] as &(dyn ToSql + Sync))
                .collect();
            written += transaction
                .execute(&statement, &params)
                .await
                .map_err(append_error)?;
        }
        transaction.commit().await.map_err(append_error)?;
        Ok(written)
    }

    pub async fn close(self) {
        drop(self.client);
        if let Err(e) = self.connection.await {
            warn!("Database connection task did not shut down cleanly: {}", e);
        }
        debug!("Closed database session");
    }
}

fn describe(error: &QueryError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn insert_statement(frame: &DataFrame, table_name: &str) -> Result<String, QueryError> {
    if !is_identifier(table_name) {
        return Err(QueryError::InvalidTableName(table_name.to_string()));
    }
    let names = frame.get_column_names();
    if let Some(bad) = names.iter().find(|name| !is_identifier(name.as_str())) {
        return Err(QueryError::InvalidTableName(bad.to_string()));
    }

    let columns = names
        .iter()
        .map(|name| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=names.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!(
        "INSERT INTO \"{table_name}\" ({columns}) VALUES ({placeholders})"
    ))
}

fn column_values(column: &Column) -> Result<Vec<SqlValue>, QueryError> {
    let unsupported = || QueryError::UnsupportedColumnType {
        column: column.name().to_string(),
        dtype: column.dtype().to_string(),
    };
    let frame_error = QueryError::Frame;

    let values: Vec<SqlValue> = match column.dtype() {
        DataType::Float64 | DataType::Float32 => column
            .cast(&DataType::Float64)
            .map_err(frame_error)?
            .f64()
            .map_err(frame_error)?
            .into_iter()
            .map(|v| Box::new(v) as SqlValue)
            .collect(),
        DataType::Int64 => column
            .i64()
            .map_err(frame_error)?
            .into_iter()
            .map(|v| Box::new(v) as SqlValue)
            .collect(),
        DataType::Int32 | DataType::Int16 | DataType::Int8 => column
            .cast(&DataType::Int32)
            .map_err(frame_error)?
            .i32()
            .map_err(frame_error)?
            .into_iter()
            .map(|v| Box::new(v) as SqlValue)
            .collect(),
        DataType::Boolean => column
            .bool()
            .map_err(frame_error)?
            .into_iter()
            .map(|v| Box::new(v) as SqlValue)
            .collect(),
        DataType::String => column
            .str()
            .map_err(frame_error)?
            .into_iter()
            .map(|v| Box::new(v.map(str::to_string)) as SqlValue)
            .collect(),
        DataType::Date => {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).ok_or_else(unsupported)?;
            column
                .cast(&DataType::Int32)
                .map_err(frame_error)?
                .i32()
                .map_err(frame_error)?
                .into_iter()
                .map(|days| Box::new(days.map(|d| epoch + Duration::days(d as i64))) as SqlValue)
                .collect()
        }
        _ => return Err(unsupported()),
    };
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_leaves_store_unconfigured() {
        assert!(!RainfallStore::new(None).is_configured());
        assert!(!RainfallStore::new(Some("postgres://user@localhost:notaport/rain")).is_configured());
        assert!(RainfallStore::new(Some("postgres://user:pw@localhost:5432/rain")).is_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_store_yields_no_data() {
        let store = RainfallStore::new(None);
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

        assert!(matches!(
            store.try_query_table(date, Frequency::Daily).await,
            Err(QueryError::NotConfigured)
        ));
        assert!(store.query_table(date, Frequency::Yearly).await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_database_yields_no_data() {
        // Port 1 on localhost refuses connections.
        let store = RainfallStore::new(Some("host=127.0.0.1 port=1 user=rain connect_timeout=2"));
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

        assert!(store.query_table(date, Frequency::Monthly).await.is_none());
    }

    #[test]
    fn test_insert_statement() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!("state" => ["Goa"], "rain" => [1.0])?;
        assert_eq!(
            insert_statement(&df, DEFAULT_APPEND_TABLE)?,
            "INSERT INTO \"rainfall_data\" (\"state\", \"rain\") VALUES ($1, $2)"
        );
        assert!(matches!(
            insert_statement(&df, "rainfall_data; DROP TABLE x"),
            Err(QueryError::InvalidTableName(_))
        ));
        Ok(())
    }

    #[test]
    fn test_column_values_cover_frame_types() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            "state" => [Some("Goa"), None],
            "year" => [2020i32, 2021],
            "rain" => [Some(1.5), None],
        )?;
        for column in df.get_columns() {
            assert_eq!(column_values(column)?.len(), 2);
        }

        let unsigned = Column::new("n".into(), [1u64, 2]);
        assert!(matches!(
            column_values(&unsigned),
            Err(QueryError::UnsupportedColumnType { .. })
        ));
        Ok(())
    }
}
