//! Three-panel time series: radiation, energy fluxes, and vegetation/water.

use plotters::coord::Shift;
use plotters::prelude::*;

use common::dectime::make_dectime;
use common::table::{InputRecord, OutputRecord};

use super::{Figure, PlotError, Series, date_label, drawing, value_range};

pub const RADIATION_Y_RANGE: (f64, f64) = (-100.0, 1000.0);
pub const FLUX_Y_RANGE: (f64, f64) = (-100.0, 400.0);

#[derive(Debug, Clone)]
pub struct BasicFigure {
    pub dectime: Vec<f64>,
    pub x_range: (f64, f64),
    pub radiation: Vec<Series>,
    pub fluxes: Vec<Series>,
    pub lai: Series,
    pub smd: Series,
    /// Forcing precipitation per row as (decimal time, mm).
    pub precip: Vec<(f64, f64)>,
}

impl BasicFigure {
    /// Pairs output and input rows by index; counts must match.
    pub fn new(output: &[OutputRecord], input: &[InputRecord]) -> Result<Self, PlotError> {
        if output.len() != input.len() {
            return Err(PlotError::RowCountMismatch {
                output: output.len(),
                input: input.len(),
            });
        }
        if output.is_empty() {
            return Err(PlotError::NoData);
        }

        let dectime = make_dectime(output)?;
        let x_range = time_range(&dectime).ok_or(PlotError::NoData)?;

        let column = |f: fn(&OutputRecord) -> f64| output.iter().map(f);

        let radiation = vec![
            Series::new("Kdown", RED, &dectime, column(|r| r.kdown)),
            Series::new("Kup", GREEN, &dectime, column(|r| r.kup)),
            Series::new("Ldown", BLUE, &dectime, column(|r| r.ldown)),
            Series::new("Lup", CYAN, &dectime, column(|r| r.lup)),
            Series::new("Q*", BLACK, &dectime, column(|r| r.qstar)),
        ];
        let fluxes = vec![
            Series::new("QS", BLACK, &dectime, column(|r| r.qs)),
            Series::new("QF", CYAN, &dectime, column(|r| r.qf)),
            Series::new("QH", RED, &dectime, column(|r| r.qh)),
            Series::new("QE", BLUE, &dectime, column(|r| r.qe)),
        ];
        let lai = Series::new("LAI", GREEN, &dectime, column(|r| r.lai));
        let smd = Series::new("SMD", BLACK, &dectime, column(|r| r.smd));

        let precip = dectime
            .iter()
            .zip(input)
            .map(|(&t, record)| (t, record.precip))
            .filter(|(t, p)| t.is_finite() && p.is_finite())
            .collect();

        Ok(Self {
            dectime,
            x_range,
            radiation,
            fluxes,
            lai,
            smd,
            precip,
        })
    }

    pub fn lai_range(&self) -> (f64, f64) {
        value_range(self.lai.points.iter().map(|(_, y)| y)).unwrap_or((0.0, 1.0))
    }

    /// Secondary axis (mm) covering precipitation bars from zero and SMD.
    pub fn water_range(&self) -> (f64, f64) {
        let zero = 0.0;
        value_range(
            self.precip
                .iter()
                .map(|(_, p)| p)
                .chain(self.smd.points.iter().map(|(_, y)| y))
                .chain(std::iter::once(&zero)),
        )
        .unwrap_or((0.0, 1.0))
    }
}

/// First to last decimal time; a single instant is widened by half a day.
pub fn time_range(dectime: &[f64]) -> Option<(f64, f64)> {
    let finite = || dectime.iter().copied().filter(|t| t.is_finite());
    let start = finite().fold(f64::INFINITY, f64::min);
    let end = finite().fold(f64::NEG_INFINITY, f64::max);

    if !start.is_finite() || !end.is_finite() {
        return None;
    }
    if start == end {
        return Some((start - 0.5, end + 0.5));
    }
    Some((start, end))
}

fn draw_line_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    x_range: (f64, f64),
    y_range: (f64, f64),
    series: &[Series],
) -> Result<(), PlotError> {
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(drawing("build chart"))?;

    chart
        .configure_mesh()
        .y_desc("W m-2")
        .x_label_formatter(&|x| date_label(*x))
        .draw()
        .map_err(drawing("configure mesh"))?;

    for s in series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), &color))
            .map_err(drawing("draw series"))?
            .label(s.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(drawing("draw legend"))?;

    Ok(())
}

impl Figure for BasicFigure {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), PlotError> {
        root.fill(&WHITE).map_err(drawing("fill background"))?;

        let panels = root.split_evenly((3, 1));

        draw_line_panel(&panels[0], self.x_range, RADIATION_Y_RANGE, &self.radiation)?;
        draw_line_panel(&panels[1], self.x_range, FLUX_Y_RANGE, &self.fluxes)?;

        let (x0, x1) = self.x_range;
        let (lai_lo, lai_hi) = self.lai_range();
        let (mm_lo, mm_hi) = self.water_range();

        let mut chart = ChartBuilder::on(&panels[2])
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .right_y_label_area_size(60)
            .build_cartesian_2d(x0..x1, lai_lo..lai_hi)
            .map_err(drawing("build chart"))?
            .set_secondary_coord(x0..x1, mm_lo..mm_hi);

        chart
            .configure_mesh()
            .x_desc("Time")
            .y_desc("LAI")
            .x_label_formatter(&|x| date_label(*x))
            .draw()
            .map_err(drawing("configure mesh"))?;

        chart
            .configure_secondary_axes()
            .y_desc("mm")
            .draw()
            .map_err(drawing("configure secondary axis"))?;

        let lai_color = self.lai.color;
        chart
            .draw_series(LineSeries::new(self.lai.points.iter().copied(), &lai_color))
            .map_err(drawing("draw LAI"))?
            .label(self.lai.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], lai_color));

        // 降水は幅 0 の棒（縦線）
        chart
            .draw_secondary_series(
                self.precip
                    .iter()
                    .filter(|(_, p)| *p != 0.0)
                    .map(|&(t, p)| PathElement::new(vec![(t, 0.0), (t, p)], BLUE)),
            )
            .map_err(drawing("draw precipitation"))?
            .label("Precip")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE.filled()));

        let smd_color = self.smd.color;
        chart
            .draw_secondary_series(LineSeries::new(self.smd.points.iter().copied(), &smd_color))
            .map_err(drawing("draw SMD"))?
            .label(self.smd.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], smd_color));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(drawing("draw legend"))?;

        Ok(())
    }
}
