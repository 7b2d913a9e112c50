//! Conversion between figures and the flat, tagged records used for
//! document files and the clipboard.
//!
//! Order is preserved in both directions; list order is z-order. Decoding is
//! all-or-nothing: the first bad record fails the whole batch.

use egui::{Color32, Pos2, Vec2, pos2};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::figure::{
    Drawable, Figure, FigureKind, FontSpec, MIN_CURVE_POINTS, MIN_LINE_POINTS, PolyFigure, PolyShape,
    Style, factory,
};

/// A point as a two-element `[x, y]` array.
pub type SerializedPoint = (f32, f32);

/// One figure as a flat record. Kind-specific fields are omitted when unused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedFigure {
    #[serde(rename = "type")]
    pub kind: FigureKind,
    pub stroke_width: u32,
    /// `[a, r, g, b]`
    pub stroke_color: [u8; 4],
    pub fill_color: [u8; 4],
    pub is_filling: bool,
    /// `[top, bot]` of the bounding box.
    pub corners: [SerializedPoint; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<SerializedPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

/// A complete document file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedDocument {
    /// `[width, height]` in pixels.
    pub canvas_size: (u32, u32),
    pub figures: Vec<SerializedFigure>,
}

fn color_to_argb(color: Color32) -> [u8; 4] {
    [color.a(), color.r(), color.g(), color.b()]
}

fn color_from_argb([a, r, g, b]: [u8; 4]) -> Color32 {
    Color32::from_rgba_premultiplied(r, g, b, a)
}

fn point_to_pair(p: Pos2) -> SerializedPoint {
    (p.x, p.y)
}

impl From<&Figure> for SerializedFigure {
    fn from(figure: &Figure) -> Self {
        let style = figure.style();
        let mut record = SerializedFigure {
            kind: figure.kind(),
            stroke_width: style.stroke_width,
            stroke_color: color_to_argb(style.stroke_color),
            fill_color: color_to_argb(style.fill_color),
            is_filling: style.is_filling,
            corners: [
                point_to_pair(figure.top_point()),
                point_to_pair(figure.bot_point()),
            ],
            points: None,
            text: None,
            font_family: None,
            font_size: None,
        };

        match figure {
            Figure::Box(_) => {}
            Figure::Poly(poly) => {
                record.points = Some(poly.points().iter().copied().map(point_to_pair).collect());
            }
            Figure::Text(text) => {
                record.text = Some(text.text().to_owned());
                record.font_family = Some(text.font().family.clone());
                record.font_size = Some(text.font().size);
            }
        }
        record
    }
}

impl SerializedFigure {
    /// Rebuilds the figure. `index` is the record's position, used in errors.
    pub fn to_figure(&self, index: usize) -> CodecResult<Figure> {
        if self.stroke_width == 0 {
            return Err(invalid(index, "strokeWidth", "must be positive"));
        }
        let style = Style {
            stroke_width: self.stroke_width,
            stroke_color: color_from_argb(self.stroke_color),
            fill_color: color_from_argb(self.fill_color),
            is_filling: self.is_filling,
        };
        let [a, b] = [
            read_point(index, "corners", self.corners[0])?,
            read_point(index, "corners", self.corners[1])?,
        ];

        let mut figure = match self.kind {
            FigureKind::Rectangle => factory::create_rectangle(a, b, style),
            FigureKind::Ellipse => factory::create_ellipse(a, b, style),
            FigureKind::StraightLine | FigureKind::CurveLine => {
                let raw = self.points.as_ref().ok_or(CodecError::MissingField {
                    index,
                    kind: self.kind,
                    field: "points",
                })?;
                let points = raw
                    .iter()
                    .map(|p| read_point(index, "points", *p))
                    .collect::<CodecResult<Vec<_>>>()?;

                if self.kind == FigureKind::StraightLine {
                    if points.len() < MIN_LINE_POINTS {
                        return Err(invalid(index, "points", "a line needs at least 2 points"));
                    }
                    Figure::Poly(PolyFigure::new(PolyShape::StraightLine, points, style))
                } else {
                    if points.len() < MIN_CURVE_POINTS {
                        return Err(invalid(index, "points", "a curve needs at least 3 points"));
                    }
                    factory::create_curve(points, style)
                }
            }
            FigureKind::TextBox => {
                let missing = |field: &'static str| CodecError::MissingField {
                    index,
                    kind: self.kind,
                    field,
                };
                let text = self.text.clone().ok_or_else(|| missing("text"))?;
                let family = self.font_family.clone().ok_or_else(|| missing("fontFamily"))?;
                let size = self.font_size.ok_or_else(|| missing("fontSize"))?;
                if !size.is_finite() || size <= 0.0 {
                    return Err(invalid(index, "fontSize", "must be a positive number"));
                }
                factory::create_text(a, b, text, FontSpec::new(family, size), style)
            }
        };

        figure.validate_edges();
        Ok(figure)
    }
}

fn invalid(index: usize, field: &'static str, reason: &str) -> CodecError {
    CodecError::InvalidField {
        index,
        field,
        reason: reason.to_owned(),
    }
}

fn read_point(index: usize, field: &'static str, (x, y): SerializedPoint) -> CodecResult<Pos2> {
    if x.is_finite() && y.is_finite() {
        Ok(pos2(x, y))
    } else {
        Err(invalid(index, field, "coordinates must be finite"))
    }
}

/// Maps figures to records, keeping their order.
pub fn serialize_figures<'a>(figures: impl IntoIterator<Item = &'a Figure>) -> Vec<SerializedFigure> {
    figures.into_iter().map(SerializedFigure::from).collect()
}

/// Rebuilds figures from records. Fails on the first invalid record.
pub fn deserialize_figures(records: &[SerializedFigure]) -> CodecResult<Vec<Figure>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| record.to_figure(index))
        .collect()
}

impl SerializedDocument {
    pub fn new<'a>(canvas_size: Vec2, figures: impl IntoIterator<Item = &'a Figure>) -> Self {
        Self {
            canvas_size: (
                canvas_size.x.round().max(0.0) as u32,
                canvas_size.y.round().max(0.0) as u32,
            ),
            figures: serialize_figures(figures),
        }
    }

    /// Canvas size and figures, validated as one unit.
    pub fn decode(&self) -> CodecResult<(Vec2, Vec<Figure>)> {
        let (width, height) = self.canvas_size;
        let size = canvas_size(width, height)?;
        let figures = deserialize_figures(&self.figures)?;
        debug!("Decoded document with {} figures", figures.len());
        Ok((size, figures))
    }

    pub fn to_json(&self) -> CodecResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> CodecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Canvas dimensions in pixels. Both sides must be non-zero.
pub fn canvas_size(width: u32, height: u32) -> CodecResult<Vec2> {
    if width == 0 || height == 0 {
        return Err(CodecError::InvalidCanvasSize { width, height });
    }
    Ok(Vec2::new(width as f32, height as f32))
}

/// Clipboard payload: a bare JSON array of records, without canvas size.
pub fn encode_clipboard<'a>(figures: impl IntoIterator<Item = &'a Figure>) -> CodecResult<String> {
    Ok(serde_json::to_string(&serialize_figures(figures))?)
}

pub fn decode_clipboard(text: &str) -> CodecResult<Vec<Figure>> {
    let records: Vec<SerializedFigure> = serde_json::from_str(text)?;
    deserialize_figures(&records)
}
