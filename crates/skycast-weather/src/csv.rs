//! City list parsing for uploaded CSV files.
//!
//! The header row decides everything: the delimiter (`;` when the header has
//! one, `,` otherwise) and which columns hold the city, country, latitude and
//! longitude (first header containing "city", "country", "lat", "lon").

use crate::types::{CityRecord, CsvError};

/// Built-in cities shown before any CSV is loaded
pub fn default_cities() -> Vec<CityRecord> {
    vec![
        CityRecord::new("Paris", Some("FR"), 48.8566, 2.3522),
        CityRecord::new("Amsterdam", Some("NL"), 52.3676, 4.9041),
        CityRecord::new("Berlin", Some("DE"), 52.52, 13.405),
    ]
}

struct Columns {
    city: usize,
    country: Option<usize>,
    lat: usize,
    lon: usize,
}

/// Parse raw CSV text into city records, dropping rows without a name or usable coordinates.
pub fn parse_cities(text: &str) -> Result<Vec<CityRecord>, CsvError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let (header, body) = match rows.split_first() {
        Some((header, body)) if !body.is_empty() => (*header, body),
        _ => return Err(CsvError::Empty),
    };

    let delimiter = if header.contains(';') { ';' } else { ',' };
    let headers: Vec<String> = header
        .split(delimiter)
        .map(|h| h.trim().to_lowercase())
        .collect();

    let columns = locate_columns(&headers).ok_or_else(|| {
        tracing::warn!(?headers, "CSV header is missing city/latitude/longitude");
        CsvError::MissingColumns {
            headers: headers.clone(),
        }
    })?;

    let cities: Vec<CityRecord> = body
        .iter()
        .filter_map(|row| parse_row(row, delimiter, &columns))
        .collect();

    if cities.is_empty() {
        return Err(CsvError::NoValidRows);
    }

    tracing::debug!(
        "Parsed {} of {} CSV rows (delimiter {:?})",
        cities.len(),
        body.len(),
        delimiter
    );
    Ok(cities)
}

fn locate_columns(headers: &[String]) -> Option<Columns> {
    let find = |needle: &str| headers.iter().position(|h| h.contains(needle));
    Some(Columns {
        city: find("city")?,
        country: find("country"),
        lat: find("lat")?,
        lon: find("lon")?,
    })
}

fn parse_row(row: &str, delimiter: char, columns: &Columns) -> Option<CityRecord> {
    let cells: Vec<&str> = row.split(delimiter).map(str::trim).collect();

    let name = cells.get(columns.city).copied().unwrap_or_default();
    if name.is_empty() {
        return None;
    }

    let latitude = cells.get(columns.lat).and_then(|c| leading_float(c))?;
    let longitude = cells.get(columns.lon).and_then(|c| leading_float(c))?;

    let country = columns
        .country
        .and_then(|i| cells.get(i))
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string());

    Some(CityRecord {
        name: name.to_string(),
        country,
        latitude,
        longitude,
    })
}

/// Parse the longest numeric prefix of `cell`, so "48.85N" reads as 48.85.
/// Non-finite results are rejected.
fn leading_float(cell: &str) -> Option<f64> {
    let bytes = cell.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    cell[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_comma_separated_rows_in_order() {
        let csv = "City,Country,Latitude,Longitude\n\
                   Paris,FR,48.8566,2.3522\n\
                   Lyon,FR,45.764,4.8357\n";
        let cities = parse_cities(csv).unwrap();
        assert_eq!(
            cities,
            vec![
                CityRecord::new("Paris", Some("FR"), 48.8566, 2.3522),
                CityRecord::new("Lyon", Some("FR"), 45.764, 4.8357),
            ]
        );
    }

    #[test]
    fn test_detects_semicolon_delimiter_and_crlf() {
        let csv = "city_name;lat;lon\r\nOslo;59.91;10.75\r\n";
        let cities = parse_cities(csv).unwrap();
        assert_eq!(cities, vec![CityRecord::new("Oslo", None, 59.91, 10.75)]);
    }

    #[test]
    fn test_header_match_is_case_insensitive_substring() {
        let csv = "  CITY ,  Country Code , LATITUDE_DEG , LONGITUDE_DEG \n Rome , IT , 41.9 , 12.5 ";
        let cities = parse_cities(csv).unwrap();
        assert_eq!(cities, vec![CityRecord::new("Rome", Some("IT"), 41.9, 12.5)]);
    }

    #[test]
    fn test_drops_invalid_rows_silently() {
        let csv = "City,Latitude,Longitude\n\
                   ,10,10\n\
                   Nowhere,abc,5\n\
                   Halfway,5\n\
                   Madrid,40.4168,-3.7038\n\
                   Overflow,1e999,1\n";
        let cities = parse_cities(csv).unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Madrid");
        assert_eq!(cities[0].longitude, -3.7038);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let csv = "\n\nCity,Lat,Lon\n\n\nVienna,48.2,16.37\n\n";
        assert_eq!(parse_cities(csv).unwrap().len(), 1);
    }

    #[test]
    fn test_header_only_is_empty() {
        assert_eq!(parse_cities("City,Lat,Lon\n"), Err(CsvError::Empty));
        assert_eq!(parse_cities(""), Err(CsvError::Empty));
        assert_eq!(parse_cities("  \n \r\n"), Err(CsvError::Empty));
    }

    #[test]
    fn test_missing_longitude_column() {
        let err = parse_cities("City,Latitude\nParis,48.8").unwrap_err();
        assert_eq!(
            err,
            CsvError::MissingColumns {
                headers: vec!["city".to_string(), "latitude".to_string()],
            }
        );
        assert_eq!(err.to_string(), "CSV must include City, Latitude, Longitude columns");
    }

    #[test]
    fn test_no_valid_rows() {
        let err = parse_cities("City,Lat,Lon\nParis,north,east").unwrap_err();
        assert_eq!(err, CsvError::NoValidRows);
    }

    #[test]
    fn test_first_matching_column_wins() {
        // "latitude" comes before "lat_backup"; "country" matches before the
        // second "city" column
        let csv = "city,country,latitude,lat_backup,longitude,city2\nBern,CH,46.95,0,7.45,ignored";
        let cities = parse_cities(csv).unwrap();
        assert_eq!(cities, vec![CityRecord::new("Bern", Some("CH"), 46.95, 7.45)]);
    }

    #[test]
    fn test_leading_float_accepts_numeric_prefix() {
        assert_eq!(leading_float("48.85N"), Some(48.85));
        assert_eq!(leading_float("-3.5e1x"), Some(-35.0));
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("7."), Some(7.0));
        assert_eq!(leading_float("1e"), Some(1.0));
        assert_eq!(leading_float("-"), None);
        assert_eq!(leading_float("."), None);
        assert_eq!(leading_float("N48"), None);
    }

    #[test]
    fn test_default_cities() {
        let names: Vec<_> = default_cities().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Paris", "Amsterdam", "Berlin"]);
    }
}
