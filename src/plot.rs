//! Thin layer over [Matplotlib][]'s explicit (object oriented) interface.
//!
//! Only the pieces needed to draw comparison charts are exposed: a
//! [`Figure`] holding one [`Axes`], line plots with labels, colors and
//! line styles, text annotations, axis scales and grids.  Figures are
//! created through `matplotlib.figure.Figure`, which does not involve
//! `pyplot` and thus never needs a GUI backend.
//!
//! [Matplotlib]: https://matplotlib.org/

use std::{
    fmt::{Display, Formatter},
    path::Path,
};
use lazy_static::lazy_static;
use numpy::PyArray1;
use pyo3::{
    prelude::*,
    exceptions::{PyFileNotFoundError, PyPermissionError},
    types::PyDict,
};

/// Call the method `$m` of the Python object `$obj` with the
/// positional arguments `$args`, discarding the result.
macro_rules! meth {
    ($obj: expr, $m: ident, $args: expr) => {
        Python::with_gil(|py| {
            $obj.bind(py).call_method1(stringify!($m), $args).map(|_| ())
        })
    };
}

/// Possible errors of the plotting functions.
#[derive(Debug)]
pub enum Error {
    /// The Python library "matplotlib" was not found.
    NoMatplotlib,
    /// The path contains an element that is not a directory or does
    /// not exist.
    FileNotFoundError,
    /// Permission denied to access or create the filesystem path.
    PermissionError,
    /// Other Python errors.
    Python(PyErr),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::NoMatplotlib =>
                write!(f, "The matplotlib library has not been found.\n\
Please install it.  See https://matplotlib.org/\n\
If you use Anaconda, see https://github.com/PyO3/pyo3/issues/1554"),
            Error::FileNotFoundError =>
                write!(f, "A path contains an element that is not a \
                           directory or does not exist"),
            Error::PermissionError =>
                write!(f, "Permission denied to access or create the \
                           filesystem path"),
            Error::Python(e) =>
                write!(f, "Python error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<PyErr> for Error {
    fn from(e: PyErr) -> Self { Error::Python(e) }
}

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import_bound(py, $m).map(|m| m.unbind()))
}}

lazy_static! {
    static ref FIGURE: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.figure")
    };
}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| Error::NoMatplotlib)
}}

/// Colors of Matplotlib's base palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Blue,
    Red,
    Green,
    Cyan,
    Magenta,
    Yellow,
    Black,
}

impl Color {
    /// Single letter code understood by Matplotlib.
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Blue => "b",
            Color::Red => "r",
            Color::Green => "g",
            Color::Cyan => "c",
            Color::Magenta => "m",
            Color::Yellow => "y",
            Color::Black => "k",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl LineStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
            LineStyle::DashDot => "-.",
            LineStyle::Dotted => ":",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
}

impl Marker {
    pub fn as_str(self) -> &'static str {
        match self {
            Marker::Circle => "o",
        }
    }
}

/// Values that can be handed to Matplotlib as a `numpy.ndarray`.
pub trait Data {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>>;
}

impl<T> Data for T where T: AsRef<[f64]> + ?Sized {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self.as_ref())
    }
}

#[derive(Debug, Clone)]
pub struct Axes {
    ax: PyObject,
}

/// The top level container for all the plot elements.
#[derive(Debug)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

impl Figure {
    /// Return a new `Figure` of the given size (in inches).
    ///
    /// Return an error if Matplotlib is not present on the system.
    pub fn new(width: f64, height: f64) -> Result<Figure, Error> {
        let figure = pymod!(FIGURE)?;
        Python::with_gil(|py| -> Result<Figure, Error> {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("figsize", (width, height))?;
            let fig = figure.bind(py).getattr("Figure")?
                .call((), Some(&kwargs))?;
            Ok(Figure { fig: fig.unbind() })
        })
    }

    /// Add a single [`Axes`] filling the figure.
    pub fn subplots(&self) -> Result<Axes, Error> {
        Python::with_gil(|py| -> Result<Axes, Error> {
            let ax = self.fig.bind(py).call_method0("subplots")?;
            Ok(Axes { ax: ax.unbind() })
        })
    }

    pub fn save(&self) -> Savefig {
        Python::with_gil(|py| Savefig { fig: self.fig.clone_ref(py) })
    }
}

pub struct Savefig {
    fig: PyObject,
}

impl Savefig {
    /// Write the figure to `path`; the format is deduced from the
    /// extension.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        Python::with_gil(|py| {
            self.fig.bind(py)
                .call_method1("savefig", (path.as_ref(),))
                .map(|_| ())
                .map_err(|e| {
                    if e.is_instance_of::<PyFileNotFoundError>(py) {
                        Error::FileNotFoundError
                    } else if e.is_instance_of::<PyPermissionError>(py) {
                        Error::PermissionError
                    } else {
                        Error::Python(e)
                    }
                })
        })?;
        Ok(())
    }
}

impl Axes {
    /// Plot `y` versus `x` as lines and/or markers.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use poisson_plots::plot::{Figure, LineStyle};
    /// let fig = Figure::new(10., 6.)?;
    /// let mut ax = fig.subplots()?;
    /// ax.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.])
    ///     .linestyle(LineStyle::Dashed)
    ///     .label("data")
    ///     .plot()?;
    /// fig.save().to_file("target/xy_plot.png")?;
    /// # Ok::<(), poisson_plots::plot::Error>(())
    /// ```
    // FIXME: Do we want to check that `x` and `y` have the same
    // dimension?  Better error message?
    pub fn xy<'a, D>(&'a mut self, x: &'a D, y: &'a D) -> XY<'a, D>
    where D: Data + ?Sized {
        // Mutably borrow `self` to reflect that the final `.plot()`
        // will mutate the underlying Python object.
        XY { axes: self, options: PlotOptions::new(), x, y }
    }

    /// Write `text` next to the point `xy` (in data coordinates).
    pub fn annotate<'a>(&'a mut self, text: &'a str, xy: (f64, f64))
                        -> Annotate<'a> {
        Annotate { axes: self, text, xy, offset: None, color: None,
                   fontsize: None, va: None }
    }

    pub fn set_title(&mut self, v: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_title, (v,))?;
        Ok(self)
    }

    /// Set the x axis' scale.  Possible values for `v` are "linear",
    /// "log", "symlog", "logit",...
    pub fn set_xscale(&mut self, v: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_xscale, (v,))?;
        Ok(self)
    }

    /// Set the y axis' scale.  See [`Axes::set_xscale`].
    pub fn set_yscale(&mut self, v: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_yscale, (v,))?;
        Ok(self)
    }

    /// Show grid lines on `which` ticks ("major", "minor" or "both").
    pub fn grid(&mut self, which: &str, linestyle: &str, alpha: f64)
                -> Result<&mut Self, Error> {
        Python::with_gil(|py| {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("which", which)?;
            kwargs.set_item("ls", linestyle)?;
            kwargs.set_item("alpha", alpha)?;
            self.ax.bind(py).call_method("grid", (true,), Some(&kwargs))?;
            Ok::<_, PyErr>(())
        })?;
        Ok(self)
    }

    pub fn set_xlabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_xlabel, (label,))?;
        Ok(self)
    }

    pub fn set_ylabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_ylabel, (label,))?;
        Ok(self)
    }

    pub fn legend(&mut self) -> Result<&mut Self, Error> {
        meth!(self.ax, legend, ())?;
        Ok(self)
    }
}

#[derive(Clone)]
struct PlotOptions<'a> {
    label: &'a str,
    color: Option<Color>,
    linestyle: Option<LineStyle>,
    marker: Option<Marker>,
    linewidth: Option<f64>,
}

impl<'a> PlotOptions<'a> {
    fn new() -> PlotOptions<'static> {
        PlotOptions { label: "", color: None, linestyle: None,
                      marker: None, linewidth: None }
    }

    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        if !self.label.is_empty() {
            kwargs.set_item("label", self.label)?
        }
        if let Some(c) = self.color {
            kwargs.set_item("color", c.as_str())?
        }
        if let Some(ls) = self.linestyle {
            kwargs.set_item("linestyle", ls.as_str())?
        }
        if let Some(m) = self.marker {
            kwargs.set_item("marker", m.as_str())?
        }
        if let Some(w) = self.linewidth {
            kwargs.set_item("linewidth", w)?
        }
        Ok(kwargs)
    }
}

/// Line plot under construction, see [`Axes::xy`].
#[must_use]
pub struct XY<'a, D>
where D: ?Sized {
    axes: &'a Axes,
    options: PlotOptions<'a>,
    x: &'a D,
    y: &'a D,
}

impl<'a, D> XY<'a, D>
where D: Data + ?Sized {
    /// Name of the line in the legend.
    pub fn label(mut self, label: &'a str) -> Self {
        self.options.label = label;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.options.color = Some(color);
        self
    }

    pub fn linestyle(mut self, ls: LineStyle) -> Self {
        self.options.linestyle = Some(ls);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.options.marker = Some(marker);
        self
    }

    pub fn linewidth(mut self, w: f64) -> Self {
        self.options.linewidth = Some(w);
        self
    }

    /// Plot the data with the options specified in [`XY`].
    pub fn plot(self) -> Result<(), Error> {
        Python::with_gil(|py| -> Result<(), Error> {
            let xn = self.x.to_numpy(py);
            let yn = self.y.to_numpy(py);
            let kwargs = self.options.kwargs(py)?;
            self.axes.ax.bind(py)
                .call_method("plot", (xn, yn), Some(&kwargs))?;
            Ok(())
        })
    }
}

/// Annotation under construction, see [`Axes::annotate`].
#[must_use]
pub struct Annotate<'a> {
    axes: &'a Axes,
    text: &'a str,
    xy: (f64, f64),
    offset: Option<(f64, f64)>,
    color: Option<Color>,
    fontsize: Option<f64>,
    va: Option<&'a str>,
}

impl<'a> Annotate<'a> {
    /// Place the text at (`dx`, `dy`) points from the annotated point.
    pub fn offset(mut self, dx: f64, dy: f64) -> Self {
        self.offset = Some((dx, dy));
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn fontsize(mut self, size: f64) -> Self {
        self.fontsize = Some(size);
        self
    }

    /// Vertical alignment: "center", "top", "bottom", "baseline",...
    pub fn va(mut self, va: &'a str) -> Self {
        self.va = Some(va);
        self
    }

    pub fn draw(self) -> Result<(), Error> {
        Python::with_gil(|py| -> Result<(), Error> {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("xy", self.xy)?;
            if let Some(offset) = self.offset {
                kwargs.set_item("xytext", offset)?;
                kwargs.set_item("textcoords", "offset points")?;
            }
            if let Some(c) = self.color {
                kwargs.set_item("color", c.as_str())?;
            }
            if let Some(size) = self.fontsize {
                kwargs.set_item("fontsize", size)?;
            }
            if let Some(va) = self.va {
                kwargs.set_item("va", va)?;
            }
            self.axes.ax.bind(py)
                .call_method("annotate", (self.text,), Some(&kwargs))?;
            Ok(())
        })
    }
}
