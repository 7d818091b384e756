//! Static directory documents and the cities used as reference positions.

use mof_core::{Coordinates, Record};
use std::io::Write;

pub const PARIS: Coordinates = Coordinates { lat: 48.8566, lon: 2.3522 };
pub const LYON: Coordinates = Coordinates { lat: 45.7640, lon: 4.8357 };
pub const MARSEILLE: Coordinates = Coordinates { lat: 43.2965, lon: 5.3698 };

/// Five records: three located in three cities, one with null coordinates,
/// one with no year. Specialties repeat so category filters keep more than
/// one record.
pub const SAMPLE_DIRECTORY: &str = r#"{
  "meta": {
    "total": 5,
    "generated_at": "2025-01-15 10:30:00",
    "source": "test fixture",
    "method": "hand-written",
    "note": "coordinates are city centres"
  },
  "mof": [
    {"id": 1, "name": "Pierre Hermé", "specialty": "Pâtissier-Confiseur",
     "address": "72 Rue Bonaparte, 75006 Paris", "year": 1997,
     "website": "https://www.pierreherme.com",
     "coordinates": {"lat": 48.8566, "lon": 2.3522}},
    {"id": 2, "name": "Mathieu Lyonnais", "specialty": "Fromager",
     "address": "Les Halles, 69003 Lyon", "year": 2011, "website": null,
     "coordinates": {"lat": 45.7640, "lon": 4.8357}},
    {"id": 3, "name": "Élodie Marin", "specialty": "Poissonnier-Écailler",
     "address": "Vieux-Port, 13002 Marseille", "year": 2019, "website": null,
     "coordinates": {"lat": 43.2965, "lon": 5.3698}},
    {"id": 4, "name": "Jean Sansposition", "specialty": "Fromager",
     "address": null, "year": 2004, "website": null,
     "coordinates": {"lat": null, "lon": null}},
    {"id": 5, "name": "Claire Boulanger", "specialty": "Pâtissier-Confiseur",
     "address": "Place Bellecour, 69002 Lyon", "year": null, "website": null,
     "coordinates": {"lat": 45.7578, "lon": 4.8320}}
  ]
}"#;

/// [`SAMPLE_DIRECTORY`] parsed.
pub fn sample_records() -> Vec<Record> {
    mof_sources::json_file::parse_directory(SAMPLE_DIRECTORY)
        .expect("fixture parses")
        .mof
}

/// Write `contents` to a temporary file that lives as long as the handle.
pub fn data_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}
