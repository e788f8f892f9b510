use crate::config::HTTP_TIMEOUT;
use crate::error::{LoadError, UnknownUniverse};
use crate::types::{Movie, RawRow, StarSlots, Universe, REQUIRED_COLUMNS};
use crate::util::{parse_number, parse_year};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub marvel_rows: usize,
    pub dc_rows: usize,
    pub year_range: Option<(i32, i32)>,
}

/// Fetch and parse the dataset. Any failure aborts the whole load.
pub fn load_dataset(url: &str) -> Result<(Vec<Movie>, LoadReport), LoadError> {
    let body = fetch_csv(url)?;
    load_from_reader(body.as_bytes())
}

pub fn fetch_csv(url: &str) -> Result<String, LoadError> {
    info!(url, "fetching dataset");
    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()?;
    let body = client.get(url).send()?.error_for_status()?.text()?;
    debug!(bytes = body.len(), "dataset downloaded");
    Ok(body)
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<(Vec<Movie>, LoadReport), LoadError> {
    // Header padding is stripped by the reader itself, so the check below and
    // the serde field names see the same text.
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col));
        }
    }

    let mut movies: Vec<Movie> = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        // 1-based, counting the header line, so it matches what an editor shows.
        let row_no = idx + 2;
        let row = result?;
        movies.push(clean_row(row_no, row)?);
    }

    let report = LoadReport {
        total_rows: movies.len(),
        marvel_rows: movies.iter().filter(|m| m.universe == Universe::Marvel).count(),
        dc_rows: movies.iter().filter(|m| m.universe == Universe::Dc).count(),
        year_range: crate::reports::year_range(&movies),
    };
    Ok((movies, report))
}

fn clean_row(row_no: usize, row: RawRow) -> Result<Movie, LoadError> {
    let release_year =
        parse_year(row.release_year.as_deref()).ok_or_else(|| LoadError::InvalidYear {
            row: row_no,
            value: row.release_year.clone().unwrap_or_default(),
        })?;

    let universe: Universe = row
        .universe
        .as_deref()
        .unwrap_or("")
        .parse()
        .map_err(|e: UnknownUniverse| LoadError::UnknownUniverse {
            row: row_no,
            value: e.0,
        })?;

    let number = |column: &'static str, cell: &Option<String>| {
        parse_number(cell.as_deref()).map_err(|_| LoadError::InvalidNumber {
            row: row_no,
            column,
            value: cell.clone().unwrap_or_default(),
        })
    };

    let imdb_rating = number("IMDB Rating", &row.imdb_rating)?;
    let metascore = number("Metascore", &row.metascore)?;
    let domestic_revenue = number("Domestic Revenue", &row.domestic_revenue)?;
    let running_time = match number("Running Time (minutes)", &row.running_time)? {
        Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Some(v as u32),
        Some(_) => {
            return Err(LoadError::InvalidNumber {
                row: row_no,
                column: "Running Time (minutes)",
                value: row.running_time.unwrap_or_default(),
            })
        }
        None => None,
    };
    if domestic_revenue.is_some_and(|v| v < 0.0) {
        return Err(LoadError::InvalidNumber {
            row: row_no,
            column: "Domestic Revenue",
            value: row.domestic_revenue.unwrap_or_default(),
        });
    }

    Ok(Movie {
        title: row.title.unwrap_or_default().trim().to_string(),
        release_year,
        universe,
        imdb_rating,
        metascore,
        running_time,
        domestic_revenue,
        stars: StarSlots::parse(row.stars.as_deref().unwrap_or("")),
    })
}
