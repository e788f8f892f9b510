use crate::error::UnknownUniverse;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

/// One CSV row exactly as it appears in the source file. Every cell is
/// kept as text so the loader can report which column was malformed.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Release Year")]
    pub release_year: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "IMDB Rating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Metascore")]
    pub metascore: Option<String>,
    #[serde(rename = "Running Time (minutes)")]
    pub running_time: Option<String>,
    #[serde(rename = "Domestic Revenue")]
    pub domestic_revenue: Option<String>,
    #[serde(rename = "Universe")]
    pub universe: Option<String>,
    #[serde(rename = "Stars")]
    pub stars: Option<String>,
}

/// Columns the loader insists on; anything else in the file is ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Release Year",
    "Title",
    "IMDB Rating",
    "Metascore",
    "Running Time (minutes)",
    "Domestic Revenue",
    "Universe",
    "Stars",
];

/// The two franchises being compared.
///
/// Variant order matches the alphabetical order of the labels so that
/// ordered maps keyed by `Universe` list DC before Marvel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Universe {
    #[serde(rename = "DC")]
    Dc,
    Marvel,
}

impl Universe {
    pub const ALL: [Universe; 2] = [Universe::Dc, Universe::Marvel];

    pub fn label(self) -> &'static str {
        match self {
            Universe::Dc => "DC",
            Universe::Marvel => "Marvel",
        }
    }
}

impl FromStr for Universe {
    type Err = UnknownUniverse;

    /// Exact label match after trimming; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "DC" => Ok(Universe::Dc),
            "Marvel" => Ok(Universe::Marvel),
            other => Err(UnknownUniverse(other.to_string())),
        }
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The numeric columns a user can pick for the per-year and trend views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    ImdbRating,
    Metascore,
    RunningTime,
    DomesticRevenue,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::ImdbRating,
        Feature::Metascore,
        Feature::RunningTime,
        Feature::DomesticRevenue,
    ];

    /// Column name in the dataset, units included.
    pub fn label(self) -> &'static str {
        match self {
            Feature::ImdbRating => "IMDB Rating",
            Feature::Metascore => "Metascore",
            Feature::RunningTime => "Running Time (minutes)",
            Feature::DomesticRevenue => "Domestic Revenue",
        }
    }

    /// File-name friendly form of the label.
    pub fn slug(self) -> &'static str {
        match self {
            Feature::ImdbRating => "imdb_rating",
            Feature::Metascore => "metascore",
            Feature::RunningTime => "running_time",
            Feature::DomesticRevenue => "domestic_revenue",
        }
    }

    pub fn value(self, movie: &Movie) -> Option<f64> {
        match self {
            Feature::ImdbRating => movie.imdb_rating,
            Feature::Metascore => movie.metascore,
            Feature::RunningTime => movie.running_time.map(f64::from),
            Feature::DomesticRevenue => movie.domestic_revenue,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The first three comma-separated names of a Stars cell.
///
/// A slot is `None` when the cell has fewer names than slots, or when the
/// name is blank after trimming. Names past the third are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarSlots([Option<String>; 3]);

impl StarSlots {
    pub fn parse(cell: &str) -> StarSlots {
        let mut slots: [Option<String>; 3] = Default::default();
        for (slot, name) in slots.iter_mut().zip(cell.split(',')) {
            let name = name.trim();
            if !name.is_empty() {
                *slot = Some(name.to_string());
            }
        }
        StarSlots(slots)
    }

    /// Names that are present, in slot order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|s| s.as_deref())
    }
}

/// A fully validated dataset row.
#[derive(Debug, Clone)]
pub struct Movie {
    pub title: String,
    pub release_year: i32,
    pub universe: Universe,
    pub imdb_rating: Option<f64>,
    pub metascore: Option<f64>,
    pub running_time: Option<u32>,
    pub domestic_revenue: Option<f64>,
    pub stars: StarSlots,
}

/// One value per universe. Both sides always exist, even when empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerUniverse<T> {
    pub marvel: T,
    pub dc: T,
}

impl<T> PerUniverse<T> {
    pub fn get(&self, universe: Universe) -> &T {
        match universe {
            Universe::Marvel => &self.marvel,
            Universe::Dc => &self.dc,
        }
    }

    pub fn get_mut(&mut self, universe: Universe) -> &mut T {
        match universe {
            Universe::Marvel => &mut self.marvel,
            Universe::Dc => &mut self.dc,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UniverseSummary {
    pub universe: Universe,
    pub imdb_rating: Option<f64>,
    pub metascore: Option<f64>,
    pub running_time: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorAppearances {
    pub name: String,
    pub appearances: usize,
}

// Display rows: everything below is already formatted for a table cell.

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SummaryRow {
    #[serde(rename = "Universe")]
    #[tabled(rename = "Universe")]
    pub universe: String,
    #[serde(rename = "IMDB Rating")]
    #[tabled(rename = "IMDB Rating")]
    pub imdb_rating: String,
    #[serde(rename = "Metascore")]
    #[tabled(rename = "Metascore")]
    pub metascore: String,
    #[serde(rename = "Running Time (minutes)")]
    #[tabled(rename = "Running Time (minutes)")]
    pub running_time: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct UniverseValueRow {
    #[serde(rename = "Universe")]
    #[tabled(rename = "Universe")]
    pub universe: String,
    #[serde(rename = "Average")]
    #[tabled(rename = "Average")]
    pub average: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TrendRow {
    #[serde(rename = "Release Year")]
    #[tabled(rename = "Release Year")]
    pub year: i32,
    #[serde(rename = "Marvel")]
    #[tabled(rename = "Marvel")]
    pub marvel: String,
    #[serde(rename = "DC")]
    #[tabled(rename = "DC")]
    pub dc: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MovieRow {
    #[serde(rename = "Release Year")]
    #[tabled(rename = "Release Year")]
    pub release_year: i32,
    #[serde(rename = "Title")]
    #[tabled(rename = "Title")]
    pub title: String,
    #[serde(rename = "IMDB Rating")]
    #[tabled(rename = "IMDB Rating")]
    pub imdb_rating: String,
    #[serde(rename = "Metascore")]
    #[tabled(rename = "Metascore")]
    pub metascore: String,
    #[serde(rename = "Domestic Revenue")]
    #[tabled(rename = "Domestic Revenue")]
    pub domestic_revenue: String,
    #[serde(rename = "Universe")]
    #[tabled(rename = "Universe")]
    pub universe: String,
    #[serde(rename = "Running Time (minutes)")]
    #[tabled(rename = "Running Time (minutes)")]
    pub running_time: String,
}

/// Every loaded column, stars included, for the raw-data view.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RawDataRow {
    #[serde(rename = "Release Year")]
    #[tabled(rename = "Release Year")]
    pub release_year: i32,
    #[serde(rename = "Title")]
    #[tabled(rename = "Title")]
    pub title: String,
    #[serde(rename = "IMDB Rating")]
    #[tabled(rename = "IMDB Rating")]
    pub imdb_rating: String,
    #[serde(rename = "Metascore")]
    #[tabled(rename = "Metascore")]
    pub metascore: String,
    #[serde(rename = "Running Time (minutes)")]
    #[tabled(rename = "Running Time (minutes)")]
    pub running_time: String,
    #[serde(rename = "Domestic Revenue")]
    #[tabled(rename = "Domestic Revenue")]
    pub domestic_revenue: String,
    #[serde(rename = "Universe")]
    #[tabled(rename = "Universe")]
    pub universe: String,
    #[serde(rename = "Stars")]
    #[tabled(rename = "Stars")]
    pub stars: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ActorRow {
    #[serde(rename = "Actor")]
    #[tabled(rename = "Actor")]
    pub actor: String,
    #[serde(rename = "Appearances")]
    #[tabled(rename = "Appearances")]
    pub appearances: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_slots_trim_and_bound() {
        let s = StarSlots::parse(" Robert Downey Jr.,  Gwyneth Paltrow ,Terrence Howard, Jeff Bridges");
        assert_eq!(
            s.names().collect::<Vec<_>>(),
            vec!["Robert Downey Jr.", "Gwyneth Paltrow", "Terrence Howard"]
        );
    }

    #[test]
    fn star_slots_missing_entries_are_none() {
        let s = StarSlots::parse("A, D");
        assert_eq!(s, StarSlots([Some("A".to_string()), Some("D".to_string()), None]));

        let blank = StarSlots::parse("A, , C");
        assert_eq!(blank.names().collect::<Vec<_>>(), vec!["A", "C"]);

        assert_eq!(StarSlots::parse("").names().count(), 0);
    }

    #[test]
    fn universe_labels_are_exact() {
        assert_eq!(" Marvel ".parse::<Universe>(), Ok(Universe::Marvel));
        assert_eq!("DC".parse::<Universe>(), Ok(Universe::Dc));
        assert_eq!(
            "marvel".parse::<Universe>(),
            Err(UnknownUniverse("marvel".to_string()))
        );
        assert!("Image".parse::<Universe>().is_err());
        assert!(Universe::Dc < Universe::Marvel);
    }
}
