//! Path data generators for area, line, arc and symbol marks.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI, TAU};

use glam::{DVec2, dvec2};

use super::defaults;
use crate::scene::Item;
use crate::types::{Num, or_zero};

/// Arc sweeps at least this close to a full turn draw a full ring.
const FULL_TURN_EPSILON: f64 = 1e-6;

/// How consecutive points are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolate {
    Linear,
    /// Horizontal step centered between points.
    Step,
    /// Vertical segment first, then horizontal.
    StepBefore,
    /// Horizontal segment first, then vertical.
    StepAfter,
}

impl Interpolate {
    /// Parse an interpolation name. Unsupported names draw straight segments.
    pub fn parse(name: Option<&str>) -> Self {
        match name {
            None | Some("linear") => Interpolate::Linear,
            Some("step") => Interpolate::Step,
            Some("step-before") => Interpolate::StepBefore,
            Some("step-after") => Interpolate::StepAfter,
            Some(_other) => {
                crate::log::warn!(interpolate = _other, "unsupported interpolation, using linear");
                Interpolate::Linear
            }
        }
    }

    /// The mode that traces the same shape when walking points backwards.
    fn reversed(self) -> Self {
        match self {
            Interpolate::StepBefore => Interpolate::StepAfter,
            Interpolate::StepAfter => Interpolate::StepBefore,
            other => other,
        }
    }
}

fn pt(out: &mut String, p: DVec2) {
    out.push_str(&format!("{},{}", Num(p.x), Num(p.y)));
}

/// Path commands through `points` after the initial position, which the
/// caller has already emitted.
fn interpolate(out: &mut String, points: &[DVec2], mode: Interpolate) {
    let Some((&first, rest)) = points.split_first() else {
        return;
    };
    let mut prev = first;
    match mode {
        Interpolate::Linear => {
            for &p in rest {
                out.push('L');
                pt(out, p);
            }
        }
        Interpolate::Step => {
            for &p in rest {
                out.push_str(&format!("H{}V{}", Num((prev.x + p.x) / 2.0), Num(p.y)));
                prev = p;
            }
            if !rest.is_empty() {
                out.push_str(&format!("H{}", Num(prev.x)));
            }
        }
        Interpolate::StepBefore => {
            for &p in rest {
                out.push_str(&format!("V{}H{}", Num(p.y), Num(p.x)));
            }
        }
        Interpolate::StepAfter => {
            for &p in rest {
                out.push_str(&format!("H{}V{}", Num(p.x), Num(p.y)));
            }
        }
    }
}

fn item_point(item: &Item) -> DVec2 {
    dvec2(or_zero(item.x), or_zero(item.y))
}

/// Path data for a line through all items.
pub fn line_path(items: &[Item]) -> String {
    let Some(first) = items.first() else {
        return String::new();
    };
    let points: Vec<DVec2> = items.iter().map(item_point).collect();
    let mode = Interpolate::parse(first.interpolate.as_deref());

    let mut out = String::from("M");
    pt(&mut out, points[0]);
    interpolate(&mut out, &points, mode);
    out
}

/// Path data for the region between the items' line and their baseline.
///
/// Vertical areas (the default) use `y2` as the baseline; horizontal areas
/// use `x2`. A missing baseline coordinate collapses onto the line.
pub fn area_path(items: &[Item]) -> String {
    let Some(first) = items.first() else {
        return String::new();
    };
    let horizontal = first.orient.as_deref() == Some("horizontal");
    let mode = Interpolate::parse(first.interpolate.as_deref());

    let top: Vec<DVec2> = items.iter().map(item_point).collect();
    let base: Vec<DVec2> = items
        .iter()
        .rev()
        .map(|item| {
            let p = item_point(item);
            if horizontal {
                dvec2(item.x2.unwrap_or(p.x), p.y)
            } else {
                dvec2(p.x, item.y2.unwrap_or(p.y))
            }
        })
        .collect();

    let mut out = String::from("M");
    pt(&mut out, top[0]);
    interpolate(&mut out, &top, mode);
    out.push('L');
    pt(&mut out, base[0]);
    interpolate(&mut out, &base, mode.reversed());
    out.push('Z');
    out
}

/// Path data for an arc item, centered on the origin.
///
/// Angles are in radians, measured clockwise from twelve o'clock.
pub fn arc_path(item: &Item) -> String {
    let r0 = or_zero(item.inner_radius);
    let r1 = or_zero(item.outer_radius);
    let a0 = or_zero(item.start_angle) - FRAC_PI_2;
    let a1 = or_zero(item.end_angle) - FRAC_PI_2;
    let (a0, a1) = if a1 < a0 { (a1, a0) } else { (a0, a1) };
    let da = a1 - a0;

    let (r0s, r1s) = (Num(r0), Num(r1));
    let mut out = String::new();

    if da >= TAU - FULL_TURN_EPSILON {
        let n1 = Num(-r1);
        out.push_str(&format!("M0,{r1s}A{r1s},{r1s} 0 1,1 0,{n1}A{r1s},{r1s} 0 1,1 0,{r1s}"));
        if r0 != 0.0 {
            let n0 = Num(-r0);
            out.push_str(&format!("M0,{r0s}A{r0s},{r0s} 0 1,0 0,{n0}A{r0s},{r0s} 0 1,0 0,{r0s}"));
        }
        out.push('Z');
        return out;
    }

    let large = if da < PI { "0" } else { "1" };
    let start = DVec2::from_angle(a0);
    let end = DVec2::from_angle(a1);

    out.push('M');
    pt(&mut out, start * r1);
    out.push_str(&format!("A{r1s},{r1s} 0 {large},1 "));
    pt(&mut out, end * r1);
    if r0 != 0.0 {
        out.push('L');
        pt(&mut out, end * r0);
        out.push_str(&format!("A{r0s},{r0s} 0 {large},0 "));
        pt(&mut out, start * r0);
    } else {
        out.push_str("L0,0");
    }
    out.push('Z');
    out
}

/// Path data for a symbol item, centered on the origin.
///
/// `size` is the symbol's area in square pixels.
pub fn symbol_path(item: &Item) -> String {
    let size = match item.size {
        Some(s) if !s.is_nan() => s,
        _ => defaults::SYMBOL_SIZE,
    };
    let shape = item.shape.as_deref().unwrap_or(defaults::SYMBOL_SHAPE);
    match shape {
        "square" => {
            let r = Num(size.sqrt() / 2.0);
            let n = Num(-size.sqrt() / 2.0);
            format!("M{n},{n}L{r},{n} {r},{r} {n},{r}Z")
        }
        "cross" => {
            let r = (size / 5.0).sqrt() / 2.0;
            let (r1, r3) = (Num(r), Num(3.0 * r));
            let (n1, n3) = (Num(-r), Num(-3.0 * r));
            format!("M{n3},{n1}H{n1}V{n3}H{r1}V{n1}H{r3}V{r1}H{r1}V{r3}H{n1}V{r1}H{n3}Z")
        }
        "diamond" => {
            let tan30 = FRAC_PI_6.tan();
            let ry = (size / (2.0 * tan30)).sqrt();
            let rx = ry * tan30;
            let (rx, ry, nx, ny) = (Num(rx), Num(ry), Num(-rx), Num(-ry));
            format!("M0,{ny}L{rx},0 0,{ry} {nx},0Z")
        }
        "triangle-up" | "triangle-down" => {
            let sqrt3 = 3f64.sqrt();
            let rx = (size / sqrt3).sqrt();
            let ry = rx * sqrt3 / 2.0;
            let ry = if shape == "triangle-up" { -ry } else { ry };
            let (rx, ry, nx, ny) = (Num(rx), Num(ry), Num(-rx), Num(-ry));
            format!("M0,{ry}L{rx},{ny} {nx},{ny}Z")
        }
        _ => {
            let r = Num((size / PI).sqrt());
            let n = Num(-(size / PI).sqrt());
            format!("M0,{r}A{r},{r} 0 1,1 0,{n}A{r},{r} 0 1,1 0,{r}Z")
        }
    }
}
