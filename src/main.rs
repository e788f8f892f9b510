// Entry point and dashboard session.
//
// The flow follows the page the report was built for:
// - the dataset is fetched once and cached for the rest of the run,
// - the static sections (raw data, per-universe summary) print once,
// - then the user picks a feature, a year and a universe, and every
//   filtered section is recomputed from the cached table, printed,
//   and exported to `dashboard_out/`.
mod charts;
mod config;
mod error;
mod loader;
mod output;
mod reports;
mod types;
mod util;

use config::{
    DATASET_URL, DEFAULT_YEAR, OUTPUT_DIR, RAW_PREVIEW_ROWS, TOP_ACTORS_K, TOP_GROSSING_DISPLAY,
    TOP_REVENUE_N,
};
use error::ChartError;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use types::{Feature, Movie, Universe};

// Written once after a successful load, read on every render.
static DATASET: OnceCell<Vec<Movie>> = OnceCell::new();

/// Print `prompt` and read one trimmed line. `None` once stdin is closed.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn prompt_feature() -> Option<Feature> {
    println!("Feature:");
    for (i, f) in Feature::ALL.iter().enumerate() {
        println!("[{}] {}", i + 1, f);
    }
    loop {
        let choice = read_line("Enter choice: ")?;
        match choice.parse::<usize>() {
            Ok(n) if (1..=Feature::ALL.len()).contains(&n) => return Some(Feature::ALL[n - 1]),
            _ => println!("Invalid choice. Please enter 1-{}.", Feature::ALL.len()),
        }
    }
}

fn prompt_year(min: i32, max: i32) -> Option<i32> {
    let default = DEFAULT_YEAR.clamp(min, max);
    loop {
        let input = read_line(&format!("Year [{}-{}] (default {}): ", min, max, default))?;
        if input.is_empty() {
            return Some(default);
        }
        match input.parse::<i32>() {
            Ok(y) if (min..=max).contains(&y) => return Some(y),
            _ => println!("Invalid year. Please enter a year between {} and {}.", min, max),
        }
    }
}

fn prompt_universe() -> Option<Universe> {
    loop {
        let input = read_line("Universe (DC/Marvel): ")?;
        let picked = Universe::ALL
            .into_iter()
            .find(|u| u.label().eq_ignore_ascii_case(&input));
        match picked {
            Some(u) => return Some(u),
            None => println!("Invalid choice. Please enter DC or Marvel."),
        }
    }
}

/// Ask the user whether to go back to the filter selection after a render.
///
/// Returns `true` if the user chose `Y`, `false` on `N` or closed input.
fn prompt_back_to_menu() -> bool {
    loop {
        let Some(resp) = read_line("Back to Filter Selection (Y/N): ") else {
            return false;
        };
        match resp.to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn export_table<T: Serialize>(file: &str, rows: &[T]) {
    let path = Path::new(OUTPUT_DIR).join(file);
    match output::write_csv(&path, rows) {
        Ok(()) => info!(path = %path.display(), rows = rows.len(), "table exported"),
        Err(e) => warn!(path = %path.display(), "write error: {}", e),
    }
}

fn export_chart(file: &str, chart: Result<String, ChartError>) {
    let path = Path::new(OUTPUT_DIR).join(file);
    let written = chart
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })
        .and_then(|svg| output::write_svg(&path, &svg));
    match written {
        Ok(()) => {
            info!(path = %path.display(), "chart exported");
            println!("(Chart saved to {})\n", path.display());
        }
        Err(e) => warn!(path = %path.display(), "chart error: {}", e),
    }
}

/// Sections that do not depend on any control.
fn render_static_sections(data: &[Movie]) {
    println!("Marvel vs. DC Analysis");
    println!("======================");

    let preview = reports::raw_preview(data, RAW_PREVIEW_ROWS);
    output::preview_table(
        "Raw Data",
        Some(
            format!(
                "showing {} of {} rows",
                preview.len(),
                util::format_int(data.len())
            )
            .as_str(),
        ),
        &preview,
        preview.len(),
    );
    export_table("raw_data.csv", &reports::raw_preview(data, data.len()));

    let summary = reports::summary_by_universe(data);
    let rows = reports::summary_rows(&summary);
    output::preview_table(
        "Summary Average Rating and Running Time by Universe",
        None,
        &rows,
        rows.len(),
    );
    export_table("summary_by_universe.csv", &rows);
    let json_path = Path::new(OUTPUT_DIR).join("summary.json");
    if let Err(e) = output::write_json(&json_path, &summary) {
        warn!(path = %json_path.display(), "write error: {}", e);
    }
}

/// Every section driven by the controls, recomputed from scratch.
fn render_filtered_sections(
    data: &[Movie],
    first_year: i32,
    feature: Feature,
    year: i32,
    universe: Universe,
) {
    let slug = feature.slug();

    let averages = reports::average_by_universe_for_year(data, feature, year);
    let rows = reports::average_rows(feature, &averages);
    output::preview_table(
        &format!("{} Average {}", year, feature),
        None,
        &rows,
        rows.len(),
    );
    export_table(&format!("average_{}_{}.csv", slug, year), &rows);
    export_chart(
        &format!("average_{}_{}.svg", slug, year),
        charts::average_chart(feature, year, &averages),
    );

    let trend = reports::trend_over_time(data, feature);
    let rows = reports::trend_rows(&trend, |p| (p.year, reports::format_feature(feature, p.value)));
    output::preview_table(
        &format!("Comparing DC and Marvel {} Trend Over Time", feature),
        None,
        &rows,
        rows.len(),
    );
    export_table(&format!("trend_{}.csv", slug), &rows);
    export_chart(
        &format!("trend_{}.svg", slug),
        charts::trend_chart(feature, &trend),
    );

    let counts = reports::count_by_year(data);
    let rows = reports::trend_rows(&counts, |p| (p.year, p.count.to_string()));
    output::preview_table(
        &format!(
            "Comparing Total Number of Movies by Universe since {}",
            first_year
        ),
        None,
        &rows,
        rows.len(),
    );
    export_table("count_by_year.csv", &rows);
    export_chart(
        "count_by_year.svg",
        charts::count_chart(first_year, &counts),
    );

    let top = reports::top_n_by_revenue(data, universe, TOP_REVENUE_N);
    let rows = reports::movie_rows(top);
    output::preview_table(
        &format!(
            "{} Top {} Highest Domestic Revenue Movies",
            universe, TOP_REVENUE_N
        ),
        None,
        &rows,
        rows.len(),
    );
    export_table(
        &format!("top_revenue_{}.csv", universe.label().to_lowercase()),
        &rows,
    );

    let actors = reports::top_actors_by_appearance(data, universe, TOP_ACTORS_K);
    let rows = reports::actor_rows(&actors);
    output::preview_table(
        &format!("{} Most Appearances by an Actor", universe),
        None,
        &rows,
        rows.len(),
    );
    export_table(
        &format!("top_actors_{}.csv", universe.label().to_lowercase()),
        &rows,
    );
    export_chart(
        &format!("top_actors_{}.svg", universe.label().to_lowercase()),
        charts::actor_chart(universe, &actors),
    );

    let top_by_year = reports::top_grossing_per_year(data);
    let rows = reports::movie_rows(top_by_year);
    output::preview_table(
        "Top Grossing Movie by Year",
        Some(
            format!(
                "first {} of {} rows",
                TOP_GROSSING_DISPLAY.min(rows.len()),
                rows.len()
            )
            .as_str(),
        ),
        &rows,
        TOP_GROSSING_DISPLAY,
    );
    export_table("top_grossing_by_year.csv", &rows);
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();

    let (movies, load_report) = match loader::load_dataset(DATASET_URL) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load dataset: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        rows = load_report.total_rows,
        marvel = load_report.marvel_rows,
        dc = load_report.dc_rows,
        "dataset loaded"
    );
    let data: &[Movie] = DATASET.get_or_init(|| movies);

    let Some((first_year, last_year)) = load_report.year_range else {
        eprintln!("Dataset is empty; nothing to report.");
        return ExitCode::FAILURE;
    };

    if let Err(e) = std::fs::create_dir_all(OUTPUT_DIR) {
        warn!("cannot create {}: {}", OUTPUT_DIR, e);
    }

    render_static_sections(data);

    loop {
        println!("\nFilter:");
        let Some(feature) = prompt_feature() else { break };
        let Some(year) = prompt_year(first_year, last_year) else { break };
        let Some(universe) = prompt_universe() else { break };
        println!();

        render_filtered_sections(data, first_year, feature, year, universe);

        if !prompt_back_to_menu() {
            break;
        }
    }
    println!("Exiting the program.");
    ExitCode::SUCCESS
}
