// Fixed dashboard settings.
//
// Everything the dashboard needs to know up front lives here as plain
// constants: where the data comes from, how many rows each ranking keeps,
// where exports go, and how charts look.
use plotters::style::RGBColor;
use std::time::Duration;

/// Where the movie table is fetched from at startup.
pub const DATASET_URL: &str =
    "https://raw.githubusercontent.com/juwimana/Web-Scraping/master/Marvel_DC.csv";

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Year the year control starts on when the user just presses Enter.
pub const DEFAULT_YEAR: i32 = 2010;

pub const TOP_REVENUE_N: usize = 5;
pub const TOP_ACTORS_K: usize = 10;
/// The top-grossing table only shows this many rows.
pub const TOP_GROSSING_DISPLAY: usize = 32;
pub const RAW_PREVIEW_ROWS: usize = 10;

pub const OUTPUT_DIR: &str = "dashboard_out";

pub const WIDE_CHART: (u32, u32) = (1400, 700);
pub const ACTOR_CHART: (u32, u32) = (1120, 480);

pub const TREND_MARVEL: RGBColor = RGBColor(255, 0, 0);
pub const TREND_DC: RGBColor = RGBColor(0, 0, 255);
pub const COUNT_MARVEL: RGBColor = RGBColor(0xcf, 0x22, 0x13);
pub const COUNT_DC: RGBColor = RGBColor(0, 0, 0);
pub const BAR_FILL: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
pub const ACTOR_BAR_FILL: RGBColor = RGBColor(0xcb, 0x43, 0x35);
pub const BAR_LABEL: RGBColor = RGBColor(0x34, 0x49, 0x5e);
