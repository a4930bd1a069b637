//! Cairo-based rendering functions for annotations.
//!
//! Incremental painting and full replay go through the same two primitives,
//! [`render_dot`] and [`render_segment`], so a replayed surface matches the
//! incrementally painted one pixel for pixel.

use super::annotation::{Annotation, Point};
use super::color::Color;
use crate::input::Tool;

/// Resolved paint parameters for one annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
    /// Eraser strokes remove ink instead of adding it
    pub erase: bool,
}

impl Brush {
    /// Builds the brush an annotation paints with.
    pub fn for_annotation(annotation: &Annotation) -> Self {
        Self {
            color: annotation.color(),
            width: annotation.stroke_width.max(0.0),
            opacity: annotation.opacity.clamp(0.0, 1.0),
            erase: annotation.tool == Tool::Eraser,
        }
    }

    fn apply(&self, ctx: &cairo::Context) {
        ctx.set_operator(if self.erase {
            cairo::Operator::DestOut
        } else {
            cairo::Operator::Over
        });
        ctx.set_source_rgba(
            self.color.r,
            self.color.g,
            self.color.b,
            self.color.a * self.opacity,
        );
    }
}

/// Clears the whole surface to transparent.
pub fn clear(ctx: &cairo::Context) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Clear);
    let _ = ctx.paint();
    let _ = ctx.restore();
}

/// Paints the filled circle a stroke starts with.
pub fn render_dot(ctx: &cairo::Context, brush: &Brush, at: Point) {
    if brush.width <= 0.0 {
        return;
    }
    let _ = ctx.save();
    brush.apply(ctx);
    ctx.arc(at.x, at.y, brush.width / 2.0, 0.0, std::f64::consts::PI * 2.0);
    let _ = ctx.fill();
    let _ = ctx.restore();
}

/// Paints one round-capped segment of a stroke.
pub fn render_segment(ctx: &cairo::Context, brush: &Brush, from: Point, to: Point) {
    if brush.width <= 0.0 {
        return;
    }
    let _ = ctx.save();
    brush.apply(ctx);
    ctx.set_line_width(brush.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Replays one annotation: the starting dot, then a segment per point.
pub fn render_annotation(ctx: &cairo::Context, annotation: &Annotation) {
    let Some(&first) = annotation.points.first() else {
        return;
    };
    let brush = Brush::for_annotation(annotation);
    render_dot(ctx, &brush, first);
    for pair in annotation.points.windows(2) {
        render_segment(ctx, &brush, pair[0], pair[1]);
    }
}

/// Renders annotations in order (first = bottom layer).
pub fn render_annotations<'a>(
    ctx: &cairo::Context,
    annotations: impl IntoIterator<Item = &'a Annotation>,
) {
    for annotation in annotations {
        render_annotation(ctx, annotation);
    }
}
