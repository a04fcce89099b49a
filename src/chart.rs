//! Comparison charts: labeled series sharing one pair of axes.
//!
//! A [`Chart`] is plain data.  It is assembled by the benchmark and
//! convergence loaders, inspected by tests, and only handed to
//! Matplotlib by [`Chart::draw`] / [`Chart::save`].

use std::path::Path;
use crate::plot::{Color, Error, Figure, LineStyle, Marker};

/// Size of the figure in inches.
pub const FIGSIZE: (f64, f64) = (10., 6.);
/// Transparency of the grid lines.
pub const GRID_ALPHA: f64 = 0.5;
/// Font size of end-of-line annotations.
pub const ANNOTATION_FONTSIZE: f64 = 9.;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    Log,
}

impl Scale {
    pub fn as_str(self) -> &'static str {
        match self {
            Scale::Linear => "linear",
            Scale::Log => "log",
        }
    }
}

/// Text attached to a data point, shifted by `offset` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub at: (f64, f64),
    pub offset: (f64, f64),
}

/// One plotted curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Option<Color>,
    pub line_style: Option<LineStyle>,
    pub marker: Option<Marker>,
    pub line_width: Option<f64>,
    pub annotation: Option<Annotation>,
}

impl Series {
    /// A series drawn with Matplotlib's default style.
    pub fn new(label: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Series { label: label.into(), x, y, color: None, line_style: None,
                 marker: None, line_width: None, annotation: None }
    }

    /// The last point of the series, if any.
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.x.last()?, *self.y.last()?))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_scale: Scale,
    pub y_scale: Scale,
    pub series: Vec<Series>,
}

impl Chart {
    /// An empty chart with linear axes.
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Chart { title: title.to_string(),
                x_label: x_label.to_string(),
                y_label: y_label.to_string(),
                x_scale: Scale::Linear,
                y_scale: Scale::Linear,
                series: vec![] }
    }

    pub fn x_scale(mut self, scale: Scale) -> Self {
        self.x_scale = scale;
        self
    }

    pub fn y_scale(mut self, scale: Scale) -> Self {
        self.y_scale = scale;
        self
    }

    pub fn push(&mut self, series: Series) {
        self.series.push(series)
    }

    /// Legend entries, in drawing order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.series.iter().map(|s| s.label.as_str())
    }

    /// Render the chart onto a new Matplotlib figure.
    pub fn draw(&self) -> Result<Figure, Error> {
        let fig = Figure::new(FIGSIZE.0, FIGSIZE.1)?;
        let mut ax = fig.subplots()?;
        for s in &self.series {
            let mut line = ax.xy(&s.x, &s.y).label(&s.label);
            if let Some(c) = s.color { line = line.color(c) }
            if let Some(ls) = s.line_style { line = line.linestyle(ls) }
            if let Some(m) = s.marker { line = line.marker(m) }
            if let Some(w) = s.line_width { line = line.linewidth(w) }
            line.plot()?;
            if let Some(a) = &s.annotation {
                let mut text = ax.annotate(&a.text, a.at)
                    .offset(a.offset.0, a.offset.1)
                    .fontsize(ANNOTATION_FONTSIZE)
                    .va("center");
                if let Some(c) = s.color { text = text.color(c) }
                text.draw()?;
            }
        }
        ax.set_xscale(self.x_scale.as_str())?
            .set_yscale(self.y_scale.as_str())?
            .set_title(&self.title)?
            .set_xlabel(&self.x_label)?
            .set_ylabel(&self.y_label)?
            .grid("both", "-", GRID_ALPHA)?;
        // An empty legend only makes Matplotlib warn.
        if !self.series.is_empty() {
            ax.legend()?;
        }
        Ok(fig)
    }

    /// Draw the chart and write it to `path` (format from extension).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.draw()?.save().to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn sample() -> Chart {
        let mut chart = Chart::new("Title", "x", "y").y_scale(Scale::Log);
        let mut s = Series::new("a", vec![1., 2., 3.], vec![0.5, 0.1, 0.01]);
        s.color = Some(Color::Green);
        s.line_style = Some(LineStyle::Dotted);
        s.annotation = Some(Annotation { text: "1.00e-02".into(),
                                         at: (3., 0.01),
                                         offset: (10., 0.) });
        chart.push(s);
        chart.push(Series::new("b", vec![1., 2.], vec![1., 0.2]));
        chart
    }

    #[test]
    fn labels_in_order() {
        let chart = sample();
        assert_eq!(chart.labels().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(chart.x_scale, Scale::Linear);
        assert_eq!(chart.y_scale.as_str(), "log");
    }

    #[test]
    fn last_point() {
        let chart = sample();
        assert_eq!(chart.series[0].last(), Some((3., 0.01)));
        assert_eq!(Series::new("e", vec![], vec![]).last(), None);
    }

    #[test]
    fn save_png() -> Result<(), Error> {
        let path = testing::scratch("chart_sample.png");
        match sample().save(&path) {
            Err(Error::NoMatplotlib) => Ok(()),
            r => {
                r?;
                assert!(path.exists());
                Ok(())
            }
        }
    }

    #[test]
    fn save_empty_chart() -> Result<(), Error> {
        let chart = Chart::new("Empty", "x", "y").y_scale(Scale::Log);
        match chart.save(testing::scratch("chart_empty.png")) {
            Err(Error::NoMatplotlib) => Ok(()),
            r => r,
        }
    }
}
