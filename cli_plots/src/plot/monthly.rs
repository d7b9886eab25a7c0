//! Monthly energy-balance partition and water balance, side by side.

use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use common::monthly::MonthlyStats;

use super::{Figure, PlotError, Series, drawing, value_range};

pub const MONTH_AXIS: (f64, f64) = (0.5, 12.5);
pub const BAR_WIDTH: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct MonthlyFigure {
    /// Q*, -QH, -QE, -dQS, QF
    pub energy: Vec<Series>,
    /// Water use, -storage, -evaporation, -runoff
    pub water: Vec<Series>,
    /// (month, mm)
    pub precip: Vec<(f64, f64)>,
}

fn negated(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().map(|v| -v)
}

impl MonthlyFigure {
    pub fn new(stats: &MonthlyStats) -> Result<Self, PlotError> {
        if stats.is_empty() {
            return Err(PlotError::NoData);
        }

        let months: Vec<f64> = stats.months.iter().map(|&m| m as f64).collect();

        let energy = vec![
            Series::new("Q*", RED, &months, stats.qstar.iter().copied()),
            Series::new("QH", RGBColor(255, 140, 0), &months, negated(&stats.qh)),
            Series::new("QE", BLUE, &months, negated(&stats.qe)),
            Series::new("dQS", BLACK, &months, negated(&stats.qs)),
            Series::new("QF", CYAN, &months, stats.qf.iter().copied()),
        ];
        let water = vec![
            Series::new("W-use", GREEN, &months, stats.water_use.iter().copied()),
            Series::new("Storage", RED, &months, negated(&stats.storage_change)),
            Series::new("E", BLUE, &months, negated(&stats.evap)),
            Series::new("Runoff", BLACK, &months, negated(&stats.runoff)),
        ];
        let precip = months
            .iter()
            .copied()
            .zip(stats.precip.iter().copied())
            .collect();

        Ok(Self {
            energy,
            water,
            precip,
        })
    }

    pub fn energy_range(&self) -> (f64, f64) {
        let zero = 0.0;
        value_range(
            self.energy
                .iter()
                .flat_map(|s| s.points.iter().map(|(_, y)| y))
                .chain(std::iter::once(&zero)),
        )
        .unwrap_or((-1.0, 1.0))
    }

    pub fn water_range(&self) -> (f64, f64) {
        let zero = 0.0;
        value_range(
            self.water
                .iter()
                .flat_map(|s| s.points.iter().map(|(_, y)| y))
                .chain(self.precip.iter().map(|(_, p)| p))
                .chain(std::iter::once(&zero)),
        )
        .unwrap_or((-1.0, 1.0))
    }
}

fn draw_marked_series<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    series: &Series,
) -> Result<(), PlotError> {
    let color = series.color;
    chart
        .draw_series(LineSeries::new(series.points.iter().copied(), &color))
        .map_err(drawing("draw series"))?
        .label(series.label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], color));
    chart
        .draw_series(
            series
                .points
                .iter()
                .map(|&point| Circle::new(point, 3, color.filled())),
        )
        .map_err(drawing("draw markers"))?;
    Ok(())
}

fn build_month_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    title: &str,
    y_desc: &str,
    y_range: (f64, f64),
) -> Result<ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>, PlotError> {
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 20).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(MONTH_AXIS.0..MONTH_AXIS.1, y_range.0..y_range.1)
        .map_err(drawing("build chart"))?;

    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc(y_desc)
        .x_labels(12)
        .x_label_formatter(&|m| format!("{:.0}", m))
        .draw()
        .map_err(drawing("configure mesh"))?;

    Ok(chart)
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
) -> Result<(), PlotError> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(drawing("draw legend"))
}

impl Figure for MonthlyFigure {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), PlotError> {
        root.fill(&WHITE).map_err(drawing("fill background"))?;

        let panels = root.split_evenly((1, 2));

        let mut energy = build_month_chart(
            &panels[0],
            "Monthly partition of the surface energy balance",
            "W m-2",
            self.energy_range(),
        )?;
        for series in &self.energy {
            draw_marked_series(&mut energy, series)?;
        }
        energy
            .draw_series(LineSeries::new(
                vec![(MONTH_AXIS.0, 0.0), (MONTH_AXIS.1, 0.0)],
                &BLACK,
            ))
            .map_err(drawing("draw zero line"))?;
        draw_legend(&mut energy)?;

        let mut water = build_month_chart(
            &panels[1],
            "Monthly water balance",
            "mm",
            self.water_range(),
        )?;
        let half = BAR_WIDTH / 2.0;
        water
            .draw_series(self.precip.iter().map(|&(m, p)| {
                Rectangle::new([(m - half, 0.0), (m + half, p)], BLUE.mix(0.5).filled())
            }))
            .map_err(drawing("draw precipitation"))?
            .label("Precip")
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE.mix(0.5).filled())
            });
        for series in &self.water {
            draw_marked_series(&mut water, series)?;
        }
        draw_legend(&mut water)?;

        Ok(())
    }
}
