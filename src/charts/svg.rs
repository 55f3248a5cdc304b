//! Minimal SVG document writer and axis helpers shared by the charts

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 70.0;
const TICKS: usize = 5;

/// Value range of one axis, widened to round tick steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Axis {
    /// Axis covering `lo..=hi` with tick steps of 1, 2, 2.5 or 5 times a
    /// power of ten
    pub fn covering(lo: f64, hi: f64) -> Self {
        let (lo, hi) = if hi - lo > 0.0 {
            (lo, hi)
        } else {
            (lo - 1.0, hi + 1.0)
        };
        let step = nice_step((hi - lo) / TICKS as f64);
        Axis {
            min: (lo / step).floor() * step,
            max: (hi / step).ceil() * step,
            step,
        }
    }

    pub fn ticks(&self) -> Vec<f64> {
        let count = ((self.max - self.min) / self.step).round() as usize;
        (0..=count)
            .map(|i| self.min + i as f64 * self.step)
            .collect()
    }

    /// Tick label with as many decimals as the step needs
    pub fn tick_label(&self, value: f64) -> String {
        let decimals = if self.step >= 1.0 {
            0
        } else {
            (-self.step.log10()).ceil() as usize + 1
        };
        format!("{:.*}", decimals, value)
    }
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Pixel area inside the margins
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Frame {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    pub fn left(&self) -> f64 {
        MARGIN_LEFT
    }

    pub fn right(&self) -> f64 {
        self.width - MARGIN_RIGHT
    }

    pub fn top(&self) -> f64 {
        MARGIN_TOP
    }

    pub fn bottom(&self) -> f64 {
        self.height - MARGIN_BOTTOM
    }

    pub fn x(&self, axis: &Axis, value: f64) -> f64 {
        self.left() + (value - axis.min) / (axis.max - axis.min) * (self.right() - self.left())
    }

    pub fn y(&self, axis: &Axis, value: f64) -> f64 {
        self.bottom() - (value - axis.min) / (axis.max - axis.min) * (self.bottom() - self.top())
    }
}

/// Legend swatch shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swatch {
    Marker,
    Line,
    Block,
}

/// SVG text being built up element by element
pub struct SvgDocument {
    body: String,
    width: u32,
    height: u32,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        SvgDocument {
            body: String::new(),
            width,
            height,
        }
    }

    fn push(&mut self, element: std::fmt::Arguments<'_>) {
        self.body.push_str(&element.to_string());
        self.body.push('\n');
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.push(format_args!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            x,
            y,
            w,
            h,
            escape(fill)
        ));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) {
        self.push(format_args!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            x1,
            y1,
            x2,
            y2,
            escape(stroke),
            width
        ));
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.push(format_args!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
            cx,
            cy,
            r,
            escape(fill)
        ));
    }

    /// `anchor` is `start`, `middle` or `end`
    pub fn text(&mut self, x: f64, y: f64, size: u32, anchor: &str, content: &str) {
        self.push(format_args!(
            r#"<text x="{:.2}" y="{:.2}" font-size="{}" text-anchor="{}">{}</text>"#,
            x,
            y,
            size,
            anchor,
            escape(content)
        ));
    }

    pub fn rotated_text(&mut self, x: f64, y: f64, size: u32, content: &str) {
        self.push(format_args!(
            r#"<text x="{:.2}" y="{:.2}" font-size="{}" text-anchor="middle" transform="rotate(-90 {:.2} {:.2})">{}</text>"#,
            x,
            y,
            size,
            x,
            y,
            escape(content)
        ));
    }

    /// Title, axis titles, border, and tick marks for a y axis plus an
    /// optional numeric x axis
    pub fn axes(
        &mut self,
        frame: &Frame,
        title: &str,
        x_title: &str,
        y_title: &str,
        x: Option<&Axis>,
        y: &Axis,
    ) {
        self.text(frame.width / 2.0, frame.top() / 2.0 + 6.0, 16, "middle", title);
        self.text(
            (frame.left() + frame.right()) / 2.0,
            frame.height - 20.0,
            13,
            "middle",
            x_title,
        );
        self.rotated_text(22.0, (frame.top() + frame.bottom()) / 2.0, 13, y_title);

        self.line(frame.left(), frame.bottom(), frame.right(), frame.bottom(), "black", 1.0);
        self.line(frame.left(), frame.top(), frame.left(), frame.bottom(), "black", 1.0);

        for tick in y.ticks() {
            let py = frame.y(y, tick);
            self.line(frame.left() - 5.0, py, frame.left(), py, "black", 1.0);
            self.line(frame.left(), py, frame.right(), py, "#e5e5e5", 0.5);
            self.text(frame.left() - 8.0, py + 4.0, 11, "end", &y.tick_label(tick));
        }

        if let Some(x) = x {
            for tick in x.ticks() {
                let px = frame.x(x, tick);
                self.line(px, frame.bottom(), px, frame.bottom() + 5.0, "black", 1.0);
                self.text(px, frame.bottom() + 18.0, 11, "middle", &x.tick_label(tick));
            }
        }
    }

    /// Legend box in the top-right corner of the plot area
    pub fn legend(&mut self, frame: &Frame, entries: &[(Swatch, String, String)]) {
        if entries.is_empty() {
            return;
        }
        let longest = entries.iter().map(|e| e.2.chars().count()).max().unwrap_or(0);
        let box_w = 40.0 + longest as f64 * 7.0;
        let box_h = 8.0 + entries.len() as f64 * 18.0;
        let x0 = frame.right() - box_w - 8.0;
        let y0 = frame.top() + 8.0;

        self.push(format_args!(
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="white" fill-opacity="0.85" stroke="#bbbbbb"/>"##,
            x0, y0, box_w, box_h
        ));

        for (i, (swatch, color, label)) in entries.iter().enumerate() {
            let cy = y0 + 13.0 + i as f64 * 18.0;
            match swatch {
                Swatch::Marker => self.circle(x0 + 16.0, cy, 4.0, color),
                Swatch::Line => self.line(x0 + 6.0, cy, x0 + 26.0, cy, color, 2.0),
                Swatch::Block => self.rect(x0 + 9.0, cy - 5.0, 14.0, 10.0, color),
            }
            self.text(x0 + 32.0, cy + 4.0, 11, "start", label);
        }
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Escape text for use in SVG content and attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_covers_range_with_round_steps() {
        let axis = Axis::covering(24.0, 29.2);
        assert_eq!(axis.step, 2.0);
        assert!(axis.min <= 24.0 && axis.max >= 29.2);
        assert_eq!(axis.ticks(), [24.0, 26.0, 28.0, 30.0]);
        assert_eq!(axis.tick_label(26.0), "26");
    }

    #[test]
    fn test_axis_small_step_labels() {
        let axis = Axis::covering(0.0, 0.9);
        assert_eq!(axis.step, 0.2);
        assert_eq!(axis.tick_label(0.4), "0.40");
    }

    #[test]
    fn test_flat_range_is_widened() {
        let axis = Axis::covering(5.0, 5.0);
        assert!(axis.min < 5.0 && axis.max > 5.0);
    }

    #[test]
    fn test_frame_maps_axis_ends_to_margins() {
        let frame = Frame::new(800, 600);
        let axis = Axis {
            min: 0.0,
            max: 10.0,
            step: 2.0,
        };
        assert_eq!(frame.x(&axis, 0.0), frame.left());
        assert_eq!(frame.x(&axis, 10.0), frame.right());
        assert_eq!(frame.y(&axis, 0.0), frame.bottom());
        assert_eq!(frame.y(&axis, 10.0), frame.top());
    }

    #[test]
    fn test_elements_one_per_line() {
        let mut doc = SvgDocument::new(100, 50);
        doc.circle(10.0, 20.0, 4.0, "gold");
        doc.text(5.0, 5.0, 11, "start", "A & B");
        let svg = doc.finish();

        assert!(svg.contains("<circle cx=\"10.00\" cy=\"20.00\" r=\"4\" fill=\"gold\"/>\n"));
        assert!(svg.contains(">A &amp; B</text>\n</svg>\n"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("Win % <2018> & \"more\""), "Win % &lt;2018&gt; &amp; &quot;more&quot;");
    }
}
