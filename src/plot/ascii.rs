//! ASCII plotting for terminal output.
//!
//! Fixed-size character grid, deterministic output (useful for golden tests).
//!
//! Plot elements:
//! - model profile: `-` line
//! - observed (noisy) samples: `o`

/// Render a spectrum: the model as a line, optional observations as points.
///
/// `xs`, `model` and `observed` must have the same length; extra samples in
/// the longer slice are ignored.
pub fn render_spectrum_plot(
    xs: &[f64],
    model: &[f64],
    observed: Option<&[f64]>,
    unit: &str,
    width: usize,
    height: usize,
) -> String {
    let observed = observed.unwrap_or(&[]);
    let x_span = span(xs.iter().copied()).unwrap_or((0.0, 1.0));
    let (lo, hi) = span(model.iter().chain(observed).copied()).unwrap_or((0.0, 1.0));
    let margin = ((hi - lo) * 0.05).max(1e-12);
    let y_span = (lo - margin, hi + margin);

    let mut canvas = Canvas::new(width.max(10), height.max(5), x_span, y_span);
    // Points go last so they stay visible on top of the curve.
    canvas.polyline(xs, model, '-');
    canvas.scatter(xs, observed, 'o');

    format!(
        "Plot: x=[{:.6}, {:.6}] {unit} | y=[{:.3}, {:.3}]\n{}",
        x_span.0,
        x_span.1,
        y_span.0,
        y_span.1,
        canvas.render()
    )
}

/// Finite min/max, or `None` when there is no finite, non-empty span.
fn span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (lo.is_finite() && hi > lo).then_some((lo, hi))
}

type Cell = (usize, usize);

struct Canvas {
    rows: Vec<Vec<char>>,
    x_span: (f64, f64),
    y_span: (f64, f64),
}

impl Canvas {
    fn new(width: usize, height: usize, x_span: (f64, f64), y_span: (f64, f64)) -> Self {
        Self {
            rows: vec![vec![' '; width]; height],
            x_span,
            y_span,
        }
    }

    /// `(column, row)` of a data point; row 0 is the top (largest y).
    fn cell(&self, x: f64, y: f64) -> Cell {
        let last_col = (self.rows[0].len() - 1) as f64;
        let last_row = (self.rows.len() - 1) as f64;
        let u = ((x - self.x_span.0) / (self.x_span.1 - self.x_span.0)).clamp(0.0, 1.0);
        let v = ((y - self.y_span.0) / (self.y_span.1 - self.y_span.0)).clamp(0.0, 1.0);
        ((u * last_col).round() as usize, (last_row - v * last_row).round() as usize)
    }

    fn put(&mut self, (col, row): Cell, ch: char) {
        self.rows[row][col] = ch;
    }

    /// Bresenham segment that only paints blank cells.
    fn segment(&mut self, from: Cell, to: Cell, ch: char) {
        let (mut col, mut row) = (from.0 as i64, from.1 as i64);
        let (end_col, end_row) = (to.0 as i64, to.1 as i64);
        let d_col = (end_col - col).abs();
        let d_row = -(end_row - row).abs();
        let step_col = (end_col - col).signum();
        let step_row = (end_row - row).signum();
        let mut err = d_col + d_row;

        loop {
            let blank = self
                .rows
                .get_mut(row as usize)
                .and_then(|r| r.get_mut(col as usize))
                .filter(|c| **c == ' ');
            if let Some(c) = blank {
                *c = ch;
            }
            if col == end_col && row == end_row {
                break;
            }
            let e2 = 2 * err;
            if e2 >= d_row {
                err += d_row;
                col += step_col;
            }
            if e2 <= d_col {
                err += d_col;
                row += step_row;
            }
        }
    }

    fn polyline(&mut self, xs: &[f64], ys: &[f64], ch: char) {
        if xs.len().min(ys.len()) < 2 {
            return;
        }
        let mut last = None;
        for (&x, &y) in xs.iter().zip(ys) {
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }
            let here = self.cell(x, y);
            match last {
                Some(prev) => self.segment(prev, here, ch),
                None => self.put(here, ch),
            }
            last = Some(here);
        }
    }

    fn scatter(&mut self, xs: &[f64], ys: &[f64], ch: char) {
        for (&x, &y) in xs.iter().zip(ys) {
            if x.is_finite() && y.is_finite() {
                let here = self.cell(x, y);
                self.put(here, ch);
            }
        }
    }

    fn render(self) -> String {
        let mut out = String::new();
        for row in self.rows {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}
