//! SVG chart rendering for the dashboard sections.
//!
//! Every renderer draws into an in-memory SVG document with the [`plotters`]
//! SVG backend and hands the finished document back as a `String`. The
//! naive font metrics of the SVG backend mean no system fonts are needed.

use crate::config::{
    ACTOR_BAR_FILL, ACTOR_CHART, BAR_FILL, BAR_LABEL, COUNT_DC, COUNT_MARVEL, TREND_DC,
    TREND_MARVEL, WIDE_CHART,
};
use crate::error::{drawing, ChartError};
use crate::types::{ActorAppearances, Feature, PerUniverse, Universe, YearCount, YearValue};
use crate::util::format_currency;
use plotters::prelude::*;
use std::collections::BTreeMap;

type Result<T> = core::result::Result<T, ChartError>;

/// Horizontal bars; the first bar is drawn at the top.
pub struct BarChart<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub bars: Vec<(String, f64)>,
    pub fill: RGBColor,
    /// When set, each bar gets its value printed just past its end.
    pub annotate: Option<fn(f64) -> String>,
    pub size: (u32, u32),
}

impl BarChart<'_> {
    pub fn render(&self) -> Result<String> {
        let n = self.bars.len() as i32;
        // Top bar sits on the highest segment.
        let row_of = |idx: usize| n - 1 - idx as i32;
        let label_of = |row: i32| -> String {
            usize::try_from(n - 1 - row)
                .ok()
                .and_then(|idx| self.bars.get(idx))
                .map(|(label, _)| label.clone())
                .unwrap_or_default()
        };

        // `0..0` has no segment centres to label, so a lone bar gets an empty
        // row above it.
        let top_row = (n - 1).max(1);

        let x_max = self.bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        let x_max = if x_max > 0.0 { x_max * 1.12 } else { 1.0 };
        let longest = self
            .bars
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0) as u32;
        let label_area = (longest * 8 + 30).clamp(60, 320);

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(drawing)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(self.title, ("sans-serif", 26).into_font())
                .margin(20)
                .x_label_area_size(50)
                .y_label_area_size(label_area)
                .build_cartesian_2d(0f64..x_max, (0..top_row).into_segmented())
                .map_err(drawing)?;

            chart
                .configure_mesh()
                .disable_y_mesh()
                .y_labels(top_row as usize + 1)
                .y_label_formatter(&|seg| match seg {
                    SegmentValue::CenterOf(row) => label_of(*row),
                    _ => String::new(),
                })
                .x_desc(self.x_desc)
                .y_desc(self.y_desc)
                .label_style(("sans-serif", 14).into_font())
                .draw()
                .map_err(drawing)?;

            chart
                .draw_series(self.bars.iter().enumerate().map(|(idx, (_, value))| {
                    let row = row_of(idx);
                    let mut bar = Rectangle::new(
                        [
                            (0.0, SegmentValue::Exact(row)),
                            (*value, SegmentValue::Exact(row + 1)),
                        ],
                        self.fill.filled(),
                    );
                    bar.set_margin(6, 6, 0, 0);
                    bar
                }))
                .map_err(drawing)?;

            if let Some(fmt) = self.annotate {
                let style = ("sans-serif", 15).into_font().color(&BAR_LABEL);
                let nudge = x_max * 0.005;
                chart
                    .draw_series(self.bars.iter().enumerate().map(|(idx, (_, value))| {
                        Text::new(
                            fmt(*value),
                            (*value + nudge, SegmentValue::CenterOf(row_of(idx))),
                            style.clone(),
                        )
                    }))
                    .map_err(drawing)?;
            }

            root.present().map_err(drawing)?;
        }
        Ok(svg)
    }
}

/// One line per universe over release years, with a legend.
pub struct LineChart<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub series: PerUniverse<Vec<(i32, f64)>>,
    pub colors: PerUniverse<RGBColor>,
    pub y_format: fn(f64) -> String,
    pub size: (u32, u32),
}

impl LineChart<'_> {
    pub fn render(&self) -> Result<String> {
        let all = || self.series.marvel.iter().chain(&self.series.dc);
        let x_min = all().map(|(year, _)| *year).min().unwrap_or(0);
        let x_max = all().map(|(year, _)| *year).max().unwrap_or(0).max(x_min + 1);
        let y_lo = all().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        let y_hi = all().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
        let (y_lo, y_hi) = if y_lo.is_finite() && y_hi.is_finite() {
            let pad = if y_hi > y_lo { (y_hi - y_lo) * 0.05 } else { 1.0 };
            (y_lo - pad, y_hi + pad)
        } else {
            (0.0, 1.0)
        };

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(drawing)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(self.title, ("sans-serif", 26).into_font())
                .margin(20)
                .x_label_area_size(50)
                .y_label_area_size(90)
                .build_cartesian_2d(x_min..x_max, y_lo..y_hi)
                .map_err(drawing)?;

            chart
                .configure_mesh()
                .x_label_formatter(&|year| year.to_string())
                .y_label_formatter(&|v| (self.y_format)(*v))
                .x_desc(self.x_desc)
                .y_desc(self.y_desc)
                .label_style(("sans-serif", 14).into_font())
                .draw()
                .map_err(drawing)?;

            for universe in [Universe::Marvel, Universe::Dc] {
                let color = *self.colors.get(universe);
                chart
                    .draw_series(LineSeries::new(
                        self.series.get(universe).iter().copied(),
                        color.stroke_width(2),
                    ))
                    .map_err(drawing)?
                    .label(universe.label())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 30, y)], color.stroke_width(2))
                    });
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .label_font(("sans-serif", 16).into_font())
                .draw()
                .map_err(drawing)?;

            root.present().map_err(drawing)?;
        }
        Ok(svg)
    }
}

pub fn average_chart(
    feature: Feature,
    year: i32,
    averages: &BTreeMap<Universe, f64>,
) -> Result<String> {
    let title = format!("{} Average {}", year, feature);
    BarChart {
        title: &title,
        x_desc: feature.label(),
        y_desc: "Universe",
        bars: averages.iter().map(|(u, v)| (u.to_string(), *v)).collect(),
        fill: BAR_FILL,
        annotate: None,
        size: WIDE_CHART,
    }
    .render()
}

pub fn trend_chart(feature: Feature, trend: &PerUniverse<Vec<YearValue>>) -> Result<String> {
    let title = format!("Comparing DC and Marvel {} Trend Over Time", feature);
    let points = |s: &[YearValue]| -> Vec<(i32, f64)> {
        s.iter().map(|p| (p.year, p.value)).collect()
    };
    LineChart {
        title: &title,
        x_desc: "Release Year",
        y_desc: feature.label(),
        series: PerUniverse {
            marvel: points(trend.marvel.as_slice()),
            dc: points(trend.dc.as_slice()),
        },
        colors: PerUniverse {
            marvel: TREND_MARVEL,
            dc: TREND_DC,
        },
        y_format: match feature {
            Feature::DomesticRevenue => format_currency as fn(f64) -> String,
            _ => decimal_label,
        },
        size: WIDE_CHART,
    }
    .render()
}

pub fn count_chart(since: i32, counts: &PerUniverse<Vec<YearCount>>) -> Result<String> {
    let title = format!("Comparing Total Number of Movies by Universe since {}", since);
    let points = |s: &[YearCount]| -> Vec<(i32, f64)> {
        s.iter().map(|p| (p.year, p.count as f64)).collect()
    };
    LineChart {
        title: &title,
        x_desc: "Year",
        y_desc: "Count",
        series: PerUniverse {
            marvel: points(counts.marvel.as_slice()),
            dc: points(counts.dc.as_slice()),
        },
        colors: PerUniverse {
            marvel: COUNT_MARVEL,
            dc: COUNT_DC,
        },
        y_format: count_label,
        size: WIDE_CHART,
    }
    .render()
}

pub fn actor_chart(universe: Universe, actors: &[ActorAppearances]) -> Result<String> {
    let title = format!(
        "Top Ten Actors in the {} Universe by Number of Appearances",
        universe
    );
    let x_desc = format!("Number of Appearances in the {} Universe", universe);
    let y_desc = format!("{} Actor", universe);
    BarChart {
        title: &title,
        x_desc: &x_desc,
        y_desc: &y_desc,
        bars: actors
            .iter()
            .map(|a| (a.name.clone(), a.appearances as f64))
            .collect(),
        fill: ACTOR_BAR_FILL,
        annotate: Some(count_label as fn(f64) -> String),
        size: ACTOR_CHART,
    }
    .render()
}

fn count_label(v: f64) -> String {
    format!("{}", v.round() as i64)
}

fn decimal_label(v: f64) -> String {
    format!("{:.1}", v)
}
