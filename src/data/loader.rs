use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, OutcomeClass};

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_CLASS: &str = "class";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_CLASS,
    COL_PAYLOAD_MASS,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Anything that keeps the dataset from loading. Always fatal at startup.
/// Row numbers count data rows from 1, header excluded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported data format: .{0}")]
    UnsupportedFormat(String),
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("malformed CSV")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),
    #[error("malformed Parquet")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("malformed Arrow data")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("expected a top-level JSON array of records")]
    NotARecordArray,
    #[error("row {0} is not a JSON object")]
    NotARecord(usize),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: missing value in column '{column}'")]
    MissingValue { row: usize, column: &'static str },
    #[error("row {row}: invalid value '{value}' in column '{column}': {reason}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        reason: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Where the launch table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` / `https://` locations are URLs, everything else a path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }

    /// Lower-cased extension of the path, query string and fragment ignored.
    fn extension(&self) -> String {
        let path = match self {
            DataSource::File(p) => p.to_string_lossy().into_owned(),
            DataSource::Url(u) => u.split(['?', '#']).next().unwrap_or("").to_string(),
        };
        Path::new(&path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
    }

    pub fn format(&self) -> Result<DataFormat, LoadError> {
        DataFormat::from_extension(&self.extension())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(p) => write!(f, "{}", p.display()),
            DataSource::Url(u) => write!(f, "{u}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
    Parquet,
}

impl DataFormat {
    pub fn from_extension(ext: &str) -> Result<Self, LoadError> {
        match ext {
            "csv" => Ok(DataFormat::Csv),
            "json" => Ok(DataFormat::Json),
            "parquet" | "pq" => Ok(DataFormat::Parquet),
            other => Err(LoadError::UnsupportedFormat(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the four required columns (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "class": ..., ... }, ...]`
/// * `.parquet` – flat scalar columns with the required names
///
/// Any malformed row aborts the load; there is no partial dataset.
pub fn load(source: &DataSource) -> Result<LaunchDataset, LoadError> {
    let format = source.format()?;
    let dataset = match source {
        DataSource::File(path) => load_file(path, format)?,
        DataSource::Url(url) => load_url(url, format)?,
    };
    log::info!("Loaded {} launches from {source}", dataset.len());
    Ok(dataset)
}

fn load_file(path: &Path, format: DataFormat) -> Result<LaunchDataset, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    match format {
        DataFormat::Csv => read_csv(std::fs::File::open(path).map_err(io_err)?),
        DataFormat::Json => read_json(&std::fs::read(path).map_err(io_err)?),
        DataFormat::Parquet => read_parquet(std::fs::File::open(path).map_err(io_err)?),
    }
}

fn load_url(url: &str, format: DataFormat) -> Result<LaunchDataset, LoadError> {
    let http_err = |source| LoadError::Http {
        url: url.to_string(),
        source,
    };
    log::debug!("Fetching {url}");
    let body = reqwest::blocking::get(url)
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.bytes())
        .map_err(http_err)?;

    match format {
        DataFormat::Csv => read_csv(&body[..]),
        DataFormat::Json => read_json(&body[..]),
        DataFormat::Parquet => read_parquet(body),
    }
}

// ---------------------------------------------------------------------------
// Row validation, shared by all formats
// ---------------------------------------------------------------------------

/// Raw cells of the four required columns for one row; `None` for null.
struct RawRow<'a> {
    site: Option<&'a str>,
    class: Option<&'a str>,
    payload: Option<&'a str>,
    booster: Option<&'a str>,
}

fn required<'a>(
    cell: Option<&'a str>,
    row: usize,
    column: &'static str,
) -> Result<&'a str, LoadError> {
    match cell.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(LoadError::MissingValue { row, column }),
    }
}

fn parse_row(raw: RawRow<'_>, row: usize) -> Result<LaunchRecord, LoadError> {
    let site = required(raw.site, row, COL_LAUNCH_SITE)?;
    let class_str = required(raw.class, row, COL_CLASS)?;
    let payload_str = required(raw.payload, row, COL_PAYLOAD_MASS)?;
    let booster = required(raw.booster, row, COL_BOOSTER_CATEGORY)?;

    let invalid = |column, value: &str, reason| LoadError::InvalidValue {
        row,
        column,
        value: value.to_string(),
        reason,
    };

    let outcome =
        OutcomeClass::parse(class_str).ok_or_else(|| invalid(COL_CLASS, class_str, "expected 0 or 1"))?;

    let payload_mass_kg: f64 = payload_str
        .parse()
        .map_err(|_| invalid(COL_PAYLOAD_MASS, payload_str, "not a number"))?;
    if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
        return Err(invalid(
            COL_PAYLOAD_MASS,
            payload_str,
            "expected a finite non-negative mass",
        ));
    }

    Ok(LaunchRecord::new(site, outcome, payload_mass_kg, booster))
}

/// Positions of the required columns, in `REQUIRED_COLUMNS` order.
fn column_indices(
    position: impl Fn(&str) -> Option<usize>,
) -> Result<[usize; 4], LoadError> {
    let mut indices = [0; 4];
    for (slot, col) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = position(col).ok_or(LoadError::MissingColumn(col))?;
    }
    Ok(indices)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. Only the four required
/// columns are read, in any position.
fn read_csv<R: Read>(input: R) -> Result<LaunchDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();

    let [site_idx, class_idx, payload_idx, booster_idx] =
        column_indices(|col| headers.iter().position(|h| h.trim() == col))?;

    let mut records = Vec::new();
    for (row_no, result) in (1..).zip(reader.records()) {
        let record = result?;
        records.push(parse_row(
            RawRow {
                site: record.get(site_idx),
                class: record.get(class_idx),
                payload: record.get(payload_idx),
                booster: record.get(booster_idx),
            },
            row_no,
        )?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, i.e. `df.to_json(orient='records')`:
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "class": 0,
///     "Payload Mass (kg)": 0.0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
///
/// Input must be valid UTF-8.
fn read_json(bytes: &[u8]) -> Result<LaunchDataset, LoadError> {
    let root: JsonValue = serde_json::from_slice(bytes)?;
    let rows = root.as_array().ok_or(LoadError::NotARecordArray)?;

    if let Some(first) = rows.first().and_then(|r| r.as_object()) {
        for col in REQUIRED_COLUMNS {
            if !first.contains_key(col) {
                return Err(LoadError::MissingColumn(col));
            }
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in (1..).zip(rows) {
        let obj = row.as_object().ok_or(LoadError::NotARecord(i))?;
        let cell = |col: &str| obj.get(col).and_then(json_cell);
        let (site, class, payload, booster) = (
            cell(COL_LAUNCH_SITE),
            cell(COL_CLASS),
            cell(COL_PAYLOAD_MASS),
            cell(COL_BOOSTER_CATEGORY),
        );
        records.push(parse_row(
            RawRow {
                site: site.as_deref(),
                class: class.as_deref(),
                payload: payload.as_deref(),
                booster: booster.as_deref(),
            },
            i,
        )?);
    }

    Ok(LaunchDataset::from_records(records))
}

fn json_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar columns named like the CSV headers.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); numeric columns may be any integer or
/// float type since cells are validated through their display form.
fn read_parquet<T: ChunkReader + 'static>(input: T) -> Result<LaunchDataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(input)?;

    // Checked on the file schema so that a file without rows is still rejected.
    let schema = builder.schema().clone();
    let [site_idx, class_idx, payload_idx, booster_idx] =
        column_indices(|col| schema.index_of(col).ok())?;

    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let site_col = batch.column(site_idx);
        let class_col = batch.column(class_idx);
        let payload_col = batch.column(payload_idx);
        let booster_col = batch.column(booster_idx);

        for row in 0..batch.num_rows() {
            let row_no = records.len() + 1;
            let site = cell_text(site_col, row)?;
            let class = cell_text(class_col, row)?;
            let payload = cell_text(payload_col, row)?;
            let booster = cell_text(booster_col, row)?;
            records.push(parse_row(
                RawRow {
                    site: site.as_deref(),
                    class: class.as_deref(),
                    payload: payload.as_deref(),
                    booster: booster.as_deref(),
                },
                row_no,
            )?);
        }
    }

    Ok(LaunchDataset::from_records(records))
}

/// Display form of one Arrow cell, `None` for null.
fn cell_text(col: &ArrayRef, row: usize) -> Result<Option<String>, LoadError> {
    if col.is_null(row) {
        return Ok(None);
    }
    Ok(Some(array_value_to_string(col.as_ref(), row)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    const CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,KSC LC-39A,1,5000.0,F9 v1.1 B1003,v1.1
2,KSC LC-39A,0,3000,F9 v1.0 B0003,v1.0
3,VAFB SLC-4E,1,9000.0,F9 v1.1 B1010,v1.1
";

    #[test]
    fn csv_reads_required_columns_and_ignores_extras() {
        let ds = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        let first = &ds.records()[0];
        assert_eq!(first.launch_site, "KSC LC-39A");
        assert_eq!(first.outcome, OutcomeClass::Success);
        assert_eq!(first.payload_mass_kg, 5000.0);
        assert_eq!(first.booster_version_category, "v1.1");
        assert_eq!(ds.records()[1].payload_mass_kg, 3000.0);
    }

    #[test]
    fn csv_without_required_column_is_rejected() {
        let csv = "Launch Site,class,Booster Version Category\nKSC LC-39A,1,FT\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(COL_PAYLOAD_MASS)));
    }

    #[test]
    fn csv_with_empty_cell_fails_the_whole_load() {
        let csv = "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
                   KSC LC-39A,1,5000,FT\n\
                   ,0,3000,FT\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingValue {
                row: 2,
                column: COL_LAUNCH_SITE
            }
        ));
    }

    #[test]
    fn csv_with_bad_class_or_payload_is_rejected() {
        let bad_class = "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
                         KSC LC-39A,2,5000,FT\n";
        assert!(matches!(
            read_csv(bad_class.as_bytes()).unwrap_err(),
            LoadError::InvalidValue { column: COL_CLASS, .. }
        ));

        let negative = "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
                        KSC LC-39A,1,-5,FT\n";
        assert!(matches!(
            read_csv(negative.as_bytes()).unwrap_err(),
            LoadError::InvalidValue { column: COL_PAYLOAD_MASS, .. }
        ));

        let text = "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
                    KSC LC-39A,1,heavy,FT\n";
        assert!(matches!(
            read_csv(text.as_bytes()).unwrap_err(),
            LoadError::InvalidValue { column: COL_PAYLOAD_MASS, .. }
        ));
    }

    #[test]
    fn header_only_csv_is_an_empty_dataset() {
        let csv = "Launch Site,class,Payload Mass (kg),Booster Version Category\n";
        assert!(read_csv(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn json_accepts_numbers_and_strings() {
        let json = r#"[
            {"Launch Site": "CCAFS LC-40", "class": 0, "Payload Mass (kg)": 0.0, "Booster Version Category": "v1.0"},
            {"Launch Site": "KSC LC-39A", "class": "1", "Payload Mass (kg)": "2490", "Booster Version Category": "FT"}
        ]"#;
        let ds = read_json(json.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].outcome, OutcomeClass::Failure);
        assert_eq!(ds.records()[1].payload_mass_kg, 2490.0);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "KSC LC-39A"]);
    }

    #[test]
    fn json_rejects_wrong_shapes() {
        assert!(matches!(
            read_json(br#"{"Launch Site": "x"}"#).unwrap_err(),
            LoadError::NotARecordArray
        ));
        assert!(matches!(
            read_json(br#"[{"Launch Site": "x", "class": 1}]"#).unwrap_err(),
            LoadError::MissingColumn(_)
        ));
        let null_payload = br#"[{"Launch Site": "x", "class": 1, "Payload Mass (kg)": null, "Booster Version Category": "FT"}]"#;
        assert!(matches!(
            read_json(null_payload).unwrap_err(),
            LoadError::MissingValue { row: 1, column: COL_PAYLOAD_MASS }
        ));
        assert!(matches!(read_json(b"not json").unwrap_err(), LoadError::Json(_)));
    }

    #[test]
    fn json_with_invalid_utf8_is_rejected() {
        let body = b"[{\"Launch Site\": \"KSC\xff\", \"class\": 1, \"Payload Mass (kg)\": 500, \"Booster Version Category\": \"FT\"}]";
        assert!(matches!(read_json(body).unwrap_err(), LoadError::Json(_)));
    }

    #[test]
    fn errors_report_one_based_data_rows() {
        let csv = "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
                   KSC LC-39A,7,5000,FT\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { row: 1, column: COL_CLASS, .. }));
        assert!(err.to_string().starts_with("row 1:"));

        assert!(matches!(
            read_json(b"[1]").unwrap_err(),
            LoadError::NotARecord(1)
        ));
    }

    fn write_parquet(name: &str, schema: Arc<Schema>, batch: Option<RecordBatch>) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "spacex_launch_dash_{name}_{}.parquet",
            std::process::id()
        ));
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        if let Some(batch) = batch {
            writer.write(&batch).unwrap();
        }
        writer.close().unwrap();
        path
    }

    #[test]
    fn parquet_without_rows_still_needs_required_columns() {
        let schema = Arc::new(Schema::new(vec![Field::new(
            COL_LAUNCH_SITE,
            DataType::Utf8,
            false,
        )]));
        let path = write_parquet("missing_columns", schema, None);
        let res = load(&DataSource::File(path.clone()));
        std::fs::remove_file(&path).ok();
        assert!(matches!(res, Err(LoadError::MissingColumn(COL_CLASS))));
    }

    #[test]
    fn parquet_round_trips_through_a_file() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A", "VAFB SLC-4E"])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(Float64Array::from(vec![5300.0, 9600.0])),
                Arc::new(StringArray::from(vec!["FT", "B4"])),
            ],
        )
        .unwrap();

        let path = write_parquet("loader", schema, Some(batch));

        let ds = load(&DataSource::File(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].launch_site, "VAFB SLC-4E");
        assert_eq!(ds.records()[1].outcome, OutcomeClass::Failure);
        assert_eq!(ds.records()[0].payload_mass_kg, 5300.0);
    }

    #[test]
    fn data_source_detects_urls_and_formats() {
        let url = DataSource::parse("https://example.com/data/launches.csv?raw=1");
        assert!(matches!(url, DataSource::Url(_)));
        assert_eq!(url.format().unwrap(), DataFormat::Csv);

        let file = DataSource::parse("data/launches.PQ");
        assert_eq!(file, DataSource::File(PathBuf::from("data/launches.PQ")));
        assert_eq!(file.format().unwrap(), DataFormat::Parquet);

        assert!(matches!(
            DataSource::parse("launches.xlsx").format(),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load(&DataSource::parse("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
