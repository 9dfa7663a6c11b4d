pub mod births;
pub mod discovery;
pub mod error;
pub mod indicator;
pub mod numeric;
pub mod source_load;
pub mod table;
pub mod year_map;

pub use births::{
    STATE_MARKER, load_birth_file, load_birth_files, provider_read_options,
    records_from_table as birth_records_from_table,
};
pub use discovery::{
    BIRTH_PREFIX, DiscoveredSources, INDICATOR_PREFIX, discover_sources, list_csv_files,
};
pub use error::{IngestError, Result};
pub use indicator::{
    load_indicator_file, load_indicator_files, records_from_table as indicator_records_from_table,
};
pub use numeric::{
    MISSING_TOKENS, ParsedNumber, parse_cell, parse_count, parse_locale_f64, parse_plain_f64,
};
pub use source_load::SourceLoad;
pub use table::{
    PROVIDER_ENCODINGS, ReadOptions, SourceTable, UTF8_ONLY, read_table_bytes, read_table_file,
};
pub use year_map::{SourceYears, YearMap};
