use crate::types::{
    ActorAppearances, ActorRow, Feature, Movie, MovieRow, PerUniverse, RawDataRow, SummaryRow,
    TrendRow, Universe, UniverseSummary, UniverseValueRow, YearCount, YearValue,
};
use crate::util::{format_currency, format_number, format_opt, mean};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Smallest and largest release year in the dataset.
pub fn year_range(data: &[Movie]) -> Option<(i32, i32)> {
    let min = data.iter().map(|m| m.release_year).min()?;
    let max = data.iter().map(|m| m.release_year).max()?;
    Some((min, max))
}

/// Mean IMDB rating, Metascore and running time per universe.
///
/// Universes with no rows are left out.
pub fn summary_by_universe(data: &[Movie]) -> Vec<UniverseSummary> {
    Universe::ALL
        .into_iter()
        .filter_map(|universe| {
            let rows: Vec<&Movie> = data.iter().filter(|m| m.universe == universe).collect();
            if rows.is_empty() {
                return None;
            }
            Some(UniverseSummary {
                universe,
                imdb_rating: mean(rows.iter().map(|m| m.imdb_rating)),
                metascore: mean(rows.iter().map(|m| m.metascore)),
                running_time: mean(rows.iter().map(|m| Feature::RunningTime.value(m))),
            })
        })
        .collect()
}

/// Mean of `feature` per universe, restricted to one release year.
pub fn average_by_universe_for_year(
    data: &[Movie],
    feature: Feature,
    year: i32,
) -> BTreeMap<Universe, f64> {
    let mut groups: BTreeMap<Universe, Vec<Option<f64>>> = BTreeMap::new();
    for m in data.iter().filter(|m| m.release_year == year) {
        groups.entry(m.universe).or_default().push(feature.value(m));
    }
    groups
        .into_iter()
        .filter_map(|(u, values)| mean(values).map(|avg| (u, avg)))
        .collect()
}

/// Mean of `feature` per year, one ascending series per universe.
///
/// A year only appears in the series of a universe that released something
/// that year; there is no zero-fill.
pub fn trend_over_time(data: &[Movie], feature: Feature) -> PerUniverse<Vec<YearValue>> {
    let mut groups: PerUniverse<BTreeMap<i32, Vec<Option<f64>>>> = PerUniverse::default();
    for m in data {
        groups
            .get_mut(m.universe)
            .entry(m.release_year)
            .or_default()
            .push(feature.value(m));
    }
    let series = |by_year: BTreeMap<i32, Vec<Option<f64>>>| -> Vec<YearValue> {
        by_year
            .into_iter()
            .filter_map(|(year, values)| mean(values).map(|value| YearValue { year, value }))
            .collect()
    };
    PerUniverse {
        marvel: series(groups.marvel),
        dc: series(groups.dc),
    }
}

/// Number of movies per year, one ascending series per universe.
pub fn count_by_year(data: &[Movie]) -> PerUniverse<Vec<YearCount>> {
    let mut groups: PerUniverse<BTreeMap<i32, usize>> = PerUniverse::default();
    for m in data {
        *groups.get_mut(m.universe).entry(m.release_year).or_default() += 1;
    }
    let series = |by_year: BTreeMap<i32, usize>| -> Vec<YearCount> {
        by_year
            .into_iter()
            .map(|(year, count)| YearCount { year, count })
            .collect()
    };
    PerUniverse {
        marvel: series(groups.marvel),
        dc: series(groups.dc),
    }
}

/// The `n` highest-grossing movies of one universe, largest first.
/// Equal revenues keep dataset order; movies with no revenue are skipped.
pub fn top_n_by_revenue(data: &[Movie], universe: Universe, n: usize) -> Vec<&Movie> {
    let mut rows: Vec<(&Movie, f64)> = data
        .iter()
        .filter(|m| m.universe == universe)
        .filter_map(|m| m.domestic_revenue.map(|rev| (m, rev)))
        .collect();
    // `sort_by` is stable, which is what keeps ties in dataset order.
    rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    rows.into_iter().take(n).map(|(m, _)| m).collect()
}

/// Actors ranked by how many star slots they fill across one universe.
///
/// Ties keep the order in which names were first seen, reading each movie's
/// slots left to right, movie by movie.
pub fn top_actors_by_appearance(
    data: &[Movie],
    universe: Universe,
    top_k: usize,
) -> Vec<ActorAppearances> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ActorAppearances> = Vec::new();
    for m in data.iter().filter(|m| m.universe == universe) {
        for name in m.stars.names() {
            match seen.get(name).copied() {
                Some(idx) => counts[idx].appearances += 1,
                None => {
                    seen.insert(name, counts.len());
                    counts.push(ActorAppearances {
                        name: name.to_string(),
                        appearances: 1,
                    });
                }
            }
        }
    }
    counts.sort_by(|a, b| b.appearances.cmp(&a.appearances));
    counts.truncate(top_k);
    counts
}

/// Every movie that tops its release year's domestic revenue, newest year
/// first. Exact ties for a year's maximum are all kept, in dataset order.
pub fn top_grossing_per_year(data: &[Movie]) -> Vec<&Movie> {
    let mut max_by_year: HashMap<i32, f64> = HashMap::new();
    for m in data {
        if let Some(rev) = m.domestic_revenue {
            max_by_year
                .entry(m.release_year)
                .and_modify(|max| *max = max.max(rev))
                .or_insert(rev);
        }
    }
    let mut rows: Vec<&Movie> = data
        .iter()
        .filter(|m| match (m.domestic_revenue, max_by_year.get(&m.release_year)) {
            (Some(rev), Some(max)) => rev == *max,
            _ => false,
        })
        .collect();
    rows.sort_by(|a, b| b.release_year.cmp(&a.release_year));
    rows
}

// Display rows. These run after every ranking above is final.

pub fn format_feature(feature: Feature, value: f64) -> String {
    match feature {
        Feature::DomesticRevenue => format_currency(value),
        _ => format_number(value, 2),
    }
}

pub fn summary_rows(summary: &[UniverseSummary]) -> Vec<SummaryRow> {
    summary
        .iter()
        .map(|s| SummaryRow {
            universe: s.universe.to_string(),
            imdb_rating: format_opt(s.imdb_rating, 2),
            metascore: format_opt(s.metascore, 2),
            running_time: format_opt(s.running_time, 2),
        })
        .collect()
}

pub fn average_rows(feature: Feature, averages: &BTreeMap<Universe, f64>) -> Vec<UniverseValueRow> {
    averages
        .iter()
        .map(|(u, v)| UniverseValueRow {
            universe: u.to_string(),
            average: format_feature(feature, *v),
        })
        .collect()
}

/// Merge two per-year series into one table keyed by year. A universe with
/// no value for a year gets an empty cell.
pub fn trend_rows<T, F>(series: &PerUniverse<Vec<T>>, point: F) -> Vec<TrendRow>
where
    F: Fn(&T) -> (i32, String),
{
    let marvel: BTreeMap<i32, String> = series.marvel.iter().map(&point).collect();
    let dc: BTreeMap<i32, String> = series.dc.iter().map(&point).collect();
    let years: BTreeSet<i32> = marvel.keys().chain(dc.keys()).copied().collect();
    years
        .into_iter()
        .map(|year| TrendRow {
            year,
            marvel: marvel.get(&year).cloned().unwrap_or_default(),
            dc: dc.get(&year).cloned().unwrap_or_default(),
        })
        .collect()
}

pub fn movie_rows<'a, I>(movies: I) -> Vec<MovieRow>
where
    I: IntoIterator<Item = &'a Movie>,
{
    movies
        .into_iter()
        .map(|m| MovieRow {
            release_year: m.release_year,
            title: m.title.clone(),
            imdb_rating: format_opt(m.imdb_rating, 1),
            metascore: format_opt(m.metascore, 0),
            domestic_revenue: m
                .domestic_revenue
                .map(format_currency)
                .unwrap_or_else(|| "NaN".to_string()),
            universe: m.universe.to_string(),
            running_time: m
                .running_time
                .map(|t| t.to_string())
                .unwrap_or_else(|| "NaN".to_string()),
        })
        .collect()
}

/// The first `n` rows in load order, every column shown.
pub fn raw_preview(data: &[Movie], n: usize) -> Vec<RawDataRow> {
    let rows = movie_rows(data.iter().take(n));
    rows.into_iter()
        .zip(data)
        .map(|(row, m)| RawDataRow {
            release_year: row.release_year,
            title: row.title,
            imdb_rating: row.imdb_rating,
            metascore: row.metascore,
            running_time: row.running_time,
            domestic_revenue: row.domestic_revenue,
            universe: row.universe,
            stars: m.stars.names().collect::<Vec<_>>().join(", "),
        })
        .collect()
}

pub fn actor_rows(actors: &[ActorAppearances]) -> Vec<ActorRow> {
    actors
        .iter()
        .map(|a| ActorRow {
            actor: a.name.clone(),
            appearances: a.appearances,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StarSlots;

    fn movie(year: i32, title: &str, universe: Universe, rev: Option<f64>, stars: &str) -> Movie {
        Movie {
            title: title.to_string(),
            release_year: year,
            universe,
            imdb_rating: Some(7.0),
            metascore: Some(70.0),
            running_time: Some(120),
            domestic_revenue: rev,
            stars: StarSlots::parse(stars),
        }
    }

    fn rated(mut m: Movie, imdb: f64, meta: Option<f64>, minutes: u32) -> Movie {
        m.imdb_rating = Some(imdb);
        m.metascore = meta;
        m.running_time = Some(minutes);
        m
    }

    fn sample() -> Vec<Movie> {
        vec![
            rated(movie(2008, "Iron Man", Universe::Marvel, Some(318.0), "A, B, C"), 7.9, Some(79.0), 126),
            rated(movie(2008, "X", Universe::Dc, Some(500.0), "E"), 9.0, Some(84.0), 152),
            rated(movie(2012, "Avengers", Universe::Marvel, Some(623.0), "A, D"), 8.0, None, 143),
            rated(movie(2010, "Iron Man 2", Universe::Marvel, Some(312.0), ""), 7.0, Some(57.0), 124),
        ]
    }

    #[test]
    fn summary_means_per_universe() {
        let s = summary_by_universe(&sample());
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].universe, Universe::Dc);
        assert_eq!(s[0].imdb_rating, Some(9.0));
        let marvel = &s[1];
        assert!((marvel.imdb_rating.unwrap() - (7.9 + 8.0 + 7.0) / 3.0).abs() < 1e-9);
        // The missing Metascore is skipped, not counted as zero.
        assert_eq!(marvel.metascore, Some(68.0));
        assert_eq!(marvel.running_time, Some(131.0));
    }

    #[test]
    fn summary_skips_absent_universe() {
        let only_dc: Vec<Movie> = sample()
            .into_iter()
            .filter(|m| m.universe == Universe::Dc)
            .collect();
        let s = summary_by_universe(&only_dc);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].universe, Universe::Dc);
        assert!(summary_by_universe(&[]).is_empty());
    }

    #[test]
    fn average_for_year_filters_rows() {
        let data = sample();
        let avg = average_by_universe_for_year(&data, Feature::DomesticRevenue, 2008);
        assert_eq!(avg.get(&Universe::Marvel), Some(&318.0));
        assert_eq!(avg.get(&Universe::Dc), Some(&500.0));

        let only_marvel = average_by_universe_for_year(&data, Feature::ImdbRating, 2012);
        assert_eq!(only_marvel.len(), 1);

        assert!(average_by_universe_for_year(&data, Feature::ImdbRating, 1990).is_empty());
    }

    #[test]
    fn trend_is_ascending_without_fill() {
        let mut data = sample();
        data.push(movie(2008, "Hulk", Universe::Marvel, Some(134.0), ""));
        let trend = trend_over_time(&data, Feature::DomesticRevenue);
        let years: Vec<i32> = trend.marvel.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2008, 2010, 2012]);
        assert_eq!(trend.marvel[0].value, (318.0 + 134.0) / 2.0);
        assert_eq!(trend.dc, vec![YearValue { year: 2008, value: 500.0 }]);
    }

    #[test]
    fn trend_drops_years_with_no_values() {
        let trend = trend_over_time(&sample(), Feature::Metascore);
        let years: Vec<i32> = trend.get(Universe::Marvel).iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2008, 2010]);
    }

    #[test]
    fn counts_per_year() {
        let counts = count_by_year(&sample());
        assert_eq!(
            counts.marvel,
            vec![
                YearCount { year: 2008, count: 1 },
                YearCount { year: 2010, count: 1 },
                YearCount { year: 2012, count: 1 },
            ]
        );
        assert_eq!(counts.dc, vec![YearCount { year: 2008, count: 1 }]);
    }

    #[test]
    fn top_revenue_is_descending_and_stable() {
        let mut data = sample();
        data.push(movie(2019, "Tie", Universe::Marvel, Some(318.0), ""));
        data.push(movie(2020, "Unknown", Universe::Marvel, None, ""));
        let top = top_n_by_revenue(&data, Universe::Marvel, 5);
        let titles: Vec<&str> = top.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Avengers", "Iron Man", "Tie", "Iron Man 2"]);
        assert!(top.iter().all(|m| m.universe == Universe::Marvel));

        let top2 = top_n_by_revenue(&data, Universe::Marvel, 2);
        assert_eq!(top2.len(), 2);
    }

    #[test]
    fn actor_counts_and_tie_order() {
        let data = vec![
            movie(2008, "One", Universe::Marvel, None, "A, B, C"),
            movie(2009, "Two", Universe::Marvel, None, "A, D"),
            movie(2009, "Other", Universe::Dc, None, "A, Z"),
        ];
        let top = top_actors_by_appearance(&data, Universe::Marvel, 10);
        let got: Vec<(&str, usize)> = top.iter().map(|a| (a.name.as_str(), a.appearances)).collect();
        assert_eq!(got, vec![("A", 2), ("B", 1), ("C", 1), ("D", 1)]);
        let total: usize = top.iter().map(|a| a.appearances).sum();
        assert_eq!(total, 5);

        let top1 = top_actors_by_appearance(&data, Universe::Marvel, 1);
        assert_eq!(top1.len(), 1);
        assert_eq!(top1[0].name, "A");
    }

    #[test]
    fn top_grossing_per_year_example() {
        let data = vec![
            movie(2008, "Iron Man", Universe::Marvel, Some(318.0), ""),
            movie(2008, "X", Universe::Dc, Some(500.0), ""),
            movie(2012, "Avengers", Universe::Marvel, Some(623.0), ""),
        ];
        let top = top_grossing_per_year(&data);
        let got: Vec<(i32, &str)> = top.iter().map(|m| (m.release_year, m.title.as_str())).collect();
        assert_eq!(got, vec![(2012, "Avengers"), (2008, "X")]);
    }

    #[test]
    fn top_grossing_keeps_exact_ties() {
        let data = vec![
            movie(2017, "First", Universe::Marvel, Some(400.0), ""),
            movie(2017, "Second", Universe::Dc, Some(400.0), ""),
            movie(2017, "Third", Universe::Dc, Some(100.0), ""),
            movie(2018, "Unknown", Universe::Dc, None, ""),
        ];
        let top = top_grossing_per_year(&data);
        let titles: Vec<&str> = top.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn trend_rows_leave_gaps_blank() {
        let rows = trend_rows(&count_by_year(&sample()), |p| (p.year, p.count.to_string()));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].dc, "1");
        assert_eq!(rows[1].year, 2010);
        assert_eq!(rows[1].dc, "");
    }

    #[test]
    fn revenue_formatted_after_sorting() {
        let data = vec![
            movie(2008, "Small", Universe::Dc, Some(9_000_000.0), ""),
            movie(2009, "Big", Universe::Dc, Some(10_000_000.0), ""),
        ];
        // As strings "$9,000,000" > "$10,000,000"; numeric order must win.
        let rows = movie_rows(top_n_by_revenue(&data, Universe::Dc, 5));
        assert_eq!(rows[0].title, "Big");
        assert_eq!(rows[0].domestic_revenue, "$10,000,000");
    }

    #[test]
    fn raw_preview_keeps_load_order_and_stars() {
        let data = vec![
            movie(
                2012,
                "The Avengers",
                Universe::Marvel,
                Some(623_357_910.0),
                "Robert Downey Jr., Chris Evans",
            ),
            movie(2008, "The Dark Knight", Universe::Dc, None, "Christian Bale"),
            movie(2017, "Wonder Woman", Universe::Dc, Some(412_563_408.0), "Gal Gadot"),
        ];
        let rows = raw_preview(&data, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "The Avengers");
        assert_eq!(rows[0].stars, "Robert Downey Jr., Chris Evans");
        assert_eq!(rows[1].domestic_revenue, "NaN");
        assert_eq!(raw_preview(&data, 10).len(), 3);
    }
}
