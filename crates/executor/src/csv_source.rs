use csv::ReaderBuilder;
use std::fs::File;
use std::path::PathBuf;
use tracing::{error, info};

use super::config::CsvConfig;
use super::error::Error;
use super::types::{ResultSource, SeasonRecord};

/// Reads a season from a CSV file.
///
/// Columns are matched by header name: `week` plus either `winner,loser` or
/// `home,away,home_score,away_score`. Unknown columns are ignored.
pub struct CsvSource {
    path: PathBuf,
    has_headers: bool,
    delimiter: u8,
}

impl CsvSource {
    pub fn new(path: PathBuf, settings: &CsvConfig) -> Result<Self, Error> {
        let delimiter = match settings.delimiter.as_bytes() {
            [byte] => *byte,
            _ => {
                return Err(Error::ConfigLoadError(format!(
                    "CSV delimiter must be a single ASCII character, got {:?}",
                    settings.delimiter
                )));
            }
        };

        Ok(CsvSource {
            path,
            has_headers: settings.has_headers,
            delimiter,
        })
    }

    fn parse_csv_to_records(&self) -> Result<Vec<SeasonRecord>, Error> {
        let file = File::open(&self.path).map_err(|e| {
            error!(path = %self.path.display(), "Failed to read file: {}", e);
            Error::IoError(e)
        })?;

        let mut rdr = ReaderBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut records = Vec::new();

        for result in rdr.deserialize() {
            let record: SeasonRecord = result?;
            records.push(record);
        }
        Ok(records)
    }
}

impl ResultSource for CsvSource {
    fn load(&self) -> Result<Vec<SeasonRecord>, Error> {
        let records = self.parse_csv_to_records()?;

        info!(
            path = %self.path.display(),
            games = records.len(),
            "Loaded season from CSV"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MOCK_CSV_CONTENT: &str = "\
week,winner,loser,venue
1,BOS,NYK,home
1,PHI,BOS,away
2,NYK,PHI,home
";

    const MOCK_SCORED_CSV_CONTENT: &str = "\
week,home,away,home_score,away_score
1,DAL,NYG,24,17
2,NYG,PHI,14,14
";

    fn default_settings() -> CsvConfig {
        CsvConfig {
            has_headers: true,
            delimiter: ",".to_string(),
        }
    }

    fn write_temp(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(content.as_bytes())
            .expect("Failed to write mock content");
        temp_file
    }

    #[test]
    fn test_parse_csv_to_records_success() {
        let temp_file = write_temp(MOCK_CSV_CONTENT);

        let source = CsvSource::new(temp_file.path().to_path_buf(), &default_settings()).unwrap();
        let result = source.load();

        assert!(
            result.is_ok(),
            "Parsing failed with error: {:?}",
            result.err()
        );

        let records = result.unwrap();

        let expected = vec![
            SeasonRecord::decided(1, "BOS", "NYK"),
            SeasonRecord::decided(1, "PHI", "BOS"),
            SeasonRecord::decided(2, "NYK", "PHI"),
        ];

        assert_eq!(records, expected, "Parsed records do not match expected data.");
    }

    #[test]
    fn test_parse_scored_csv() {
        let temp_file = write_temp(MOCK_SCORED_CSV_CONTENT);

        let source = CsvSource::new(temp_file.path().to_path_buf(), &default_settings()).unwrap();
        let records = source.load().unwrap();

        assert_eq!(
            records,
            vec![
                SeasonRecord::scored(1, "DAL", "NYG", 24, 17),
                SeasonRecord::scored(2, "NYG", "PHI", 14, 14),
            ]
        );
    }

    #[test]
    fn test_semicolon_delimiter() {
        let temp_file = write_temp("week;winner;loser\n3;LAL;GSW\n");
        let settings = CsvConfig {
            has_headers: true,
            delimiter: ";".to_string(),
        };

        let source = CsvSource::new(temp_file.path().to_path_buf(), &settings).unwrap();
        let records = source.load().unwrap();

        assert_eq!(records, vec![SeasonRecord::decided(3, "LAL", "GSW")]);
    }

    #[test]
    fn test_multi_character_delimiter_is_rejected() {
        let settings = CsvConfig {
            has_headers: true,
            delimiter: "::".to_string(),
        };

        let result = CsvSource::new(PathBuf::from("season.csv"), &settings);
        assert!(matches!(result, Err(Error::ConfigLoadError(_))));
    }

    #[test]
    fn test_bad_week_is_a_csv_error() {
        let temp_file = write_temp("week,winner,loser\nfirst,BOS,NYK\n");

        let source = CsvSource::new(temp_file.path().to_path_buf(), &default_settings()).unwrap();
        assert!(matches!(source.load(), Err(Error::CsvError(_))));
    }

    #[test]
    fn test_parse_csv_file_not_found() {
        let source =
            CsvSource::new(PathBuf::from("non_existent_file.csv"), &default_settings()).unwrap();
        let result = source.load();

        assert!(
            result.is_err(),
            "Should have failed to open non-existent file."
        );

        if let Err(Error::IoError(e)) = result {
            assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
        } else {
            panic!("Expected IoError, got: {:?}", result.err());
        }
    }
}
