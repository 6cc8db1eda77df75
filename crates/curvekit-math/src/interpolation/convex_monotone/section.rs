//! Per-segment shapes of the convex monotone interpolant.
//!
//! Each segment `[x_prev, x_next]` carries one [`Section`], chosen once at
//! construction from the gradients `g_prev = f_prev - f_avg` and
//! `g_next = f_next - f_avg`. Shapes are parameterised on the unit interval
//! `u = (x - x_prev) / (x_next - x_prev)` and each keeps the primitive at its
//! left end so integrals chain across segments.

use super::is_zero;

/// Shape of the instantaneous curve on one segment.
#[derive(Debug, Clone)]
pub(crate) enum Section {
    /// Constant value.
    EverywhereConstant(Constant),
    /// Straight line between the end values.
    ConstantGradient(Gradient),
    /// Quadratic matching both ends and the segment average.
    Quadratic(Quadratic),
    /// Quadratic floored at zero by squeezing a flat zero region in.
    QuadraticMin(Quadratic),
    /// Flat then quadratic rising to the right end.
    ConvexMonotone2(Monotone2),
    /// Quadratic from the left end then flat.
    ConvexMonotone3(Monotone3),
    /// Two quadratics meeting at their common extremum.
    ConvexMonotone4(Monotone4),
    /// [`Section::ConvexMonotone4`] floored at zero.
    ConvexMonotone4Min(Monotone4),
    /// Weighted blend of a quadratic and a convex monotone shape.
    Combo {
        quadratic: Box<Section>,
        monotone: Box<Section>,
        weight: f64,
    },
}

impl Section {
    pub(crate) fn value(&self, x: f64) -> f64 {
        match self {
            Section::EverywhereConstant(s) => s.value,
            Section::ConstantGradient(s) => s.value(x),
            Section::Quadratic(s) | Section::QuadraticMin(s) => s.value(x),
            Section::ConvexMonotone2(s) => s.value(x),
            Section::ConvexMonotone3(s) => s.value(x),
            Section::ConvexMonotone4(s) | Section::ConvexMonotone4Min(s) => s.value(x),
            Section::Combo {
                quadratic,
                monotone,
                weight,
            } => weight * quadratic.value(x) + (1.0 - weight) * monotone.value(x),
        }
    }

    pub(crate) fn integral(&self, x: f64) -> f64 {
        match self {
            Section::EverywhereConstant(s) => s.integral(x),
            Section::ConstantGradient(s) => s.integral(x),
            Section::Quadratic(s) | Section::QuadraticMin(s) => s.integral(x),
            Section::ConvexMonotone2(s) => s.integral(x),
            Section::ConvexMonotone3(s) => s.integral(x),
            Section::ConvexMonotone4(s) | Section::ConvexMonotone4Min(s) => s.integral(x),
            Section::Combo {
                quadratic,
                monotone,
                weight,
            } => weight * quadratic.integral(x) + (1.0 - weight) * monotone.integral(x),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Constant {
    value: f64,
    prev_primitive: f64,
    x_prev: f64,
}

impl Constant {
    pub(crate) fn new(value: f64, prev_primitive: f64, x_prev: f64) -> Self {
        Self {
            value,
            prev_primitive,
            x_prev,
        }
    }

    fn integral(&self, x: f64) -> f64 {
        self.prev_primitive + (x - self.x_prev) * self.value
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Gradient {
    f_prev: f64,
    prev_primitive: f64,
    x_prev: f64,
    slope: f64,
}

impl Gradient {
    pub(crate) fn new(f_prev: f64, f_next: f64, x_prev: f64, x_next: f64, prev_primitive: f64) -> Self {
        Self {
            f_prev,
            prev_primitive,
            x_prev,
            slope: (f_next - f_prev) / (x_next - x_prev),
        }
    }

    fn value(&self, x: f64) -> f64 {
        self.f_prev + (x - self.x_prev) * self.slope
    }

    fn integral(&self, x: f64) -> f64 {
        let dx = x - self.x_prev;
        self.prev_primitive + dx * (self.f_prev + 0.5 * dx * self.slope)
    }
}

/// Zero region squeezed into a floored shape.
#[derive(Debug, Clone, Copy)]
struct Split {
    x2: f64,
    x3: f64,
    ratio: f64,
}

impl Split {
    /// Maps x onto the unit interval of the compressed shape, or `None`
    /// inside the zero region.
    fn unit(&self, x: f64, u: f64) -> Option<f64> {
        if is_zero(self.ratio) {
            None
        } else if x <= self.x2 {
            Some(u / self.ratio)
        } else if x < self.x3 {
            None
        } else {
            Some(1.0 - (1.0 - u) / self.ratio)
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Quadratic {
    x_prev: f64,
    x_next: f64,
    a: f64,
    b: f64,
    c: f64,
    x_scaling: f64,
    prev_primitive: f64,
    split: Option<(Split, f64)>,
}

impl Quadratic {
    pub(crate) fn new(
        x_prev: f64,
        x_next: f64,
        f_prev: f64,
        f_next: f64,
        f_average: f64,
        prev_primitive: f64,
    ) -> Self {
        Self {
            x_prev,
            x_next,
            a: 3.0 * f_prev + 3.0 * f_next - 6.0 * f_average,
            b: -(4.0 * f_prev + 2.0 * f_next - 6.0 * f_average),
            c: f_prev,
            x_scaling: x_next - x_prev,
            prev_primitive,
            split: None,
        }
    }

    /// Quadratic that touches zero instead of crossing it.
    ///
    /// When the plain quadratic has real roots it is replaced by the one with a
    /// double root, stretched horizontally, with a zero region in between.
    pub(crate) fn floored(
        x_prev: f64,
        x_next: f64,
        f_prev: f64,
        f_next: f64,
        f_average: f64,
        prev_primitive: f64,
    ) -> Self {
        let mut section = Self::new(x_prev, x_next, f_prev, f_next, f_average, prev_primitive);
        let discriminant = section.b * section.b - 4.0 * section.a * section.c;
        if discriminant <= 0.0 {
            return section;
        }

        let a_av = 36.0;
        let b_av = -24.0 * (f_prev + f_next);
        let c_av = 4.0 * (f_prev * f_prev + f_prev * f_next + f_next * f_next);
        let d_av = b_av * b_av - 4.0 * a_av * c_av;
        if d_av < 0.0 {
            return section;
        }

        let av_root = (-b_av - d_av.sqrt()) / (2.0 * a_av);
        let ratio = f_average / av_root;
        if is_zero(ratio) {
            // Zero average: the floored shape is zero across the segment
            section.a = 0.0;
            section.b = 0.0;
            section.c = 0.0;
            return section;
        }
        let width = x_next - x_prev;

        section.x_scaling *= ratio;
        section.a = 3.0 * f_prev + 3.0 * f_next - 6.0 * av_root;
        section.b = -(4.0 * f_prev + 2.0 * f_next - 6.0 * av_root);
        section.c = f_prev;

        let x_root = -section.b / (2.0 * section.a);
        let split = Split {
            x2: x_prev + ratio * width * x_root,
            x3: x_next - ratio * width * (1.0 - x_root),
            ratio,
        };
        let primitive_at_root = prev_primitive
            + section.x_scaling
                * (section.a / 3.0 * x_root * x_root + section.b / 2.0 * x_root + section.c)
                * x_root;
        section.split = Some((split, primitive_at_root));
        section
    }

    fn unit(&self, x: f64) -> f64 {
        (x - self.x_prev) / (self.x_next - self.x_prev)
    }

    fn value(&self, x: f64) -> f64 {
        let mut u = self.unit(x);
        if let Some((split, _)) = &self.split {
            match split.unit(x, u) {
                Some(v) => u = v,
                None => return 0.0,
            }
        }
        self.c + self.b * u + self.a * u * u
    }

    fn integral(&self, x: f64) -> f64 {
        let mut u = self.unit(x);
        if let Some((split, primitive_at_root)) = &self.split {
            match split.unit(x, u) {
                Some(v) => u = v,
                None => return *primitive_at_root,
            }
        }
        self.prev_primitive + self.x_scaling * (self.a / 3.0 * u * u + self.b / 2.0 * u + self.c) * u
    }
}

/// Shape parameters shared by the convex monotone families.
#[derive(Debug, Clone)]
struct Frame {
    x_prev: f64,
    x_scaling: f64,
    g_prev: f64,
    g_next: f64,
    f_average: f64,
    eta: f64,
    prev_primitive: f64,
}

impl Frame {
    fn unit(&self, x: f64) -> f64 {
        (x - self.x_prev) / self.x_scaling
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Monotone2(Frame);

impl Monotone2 {
    pub(crate) fn new(
        x_prev: f64,
        x_next: f64,
        g_prev: f64,
        g_next: f64,
        f_average: f64,
        eta: f64,
        prev_primitive: f64,
    ) -> Self {
        Self(Frame {
            x_prev,
            x_scaling: x_next - x_prev,
            g_prev,
            g_next,
            f_average,
            eta,
            prev_primitive,
        })
    }

    fn value(&self, x: f64) -> f64 {
        let s = &self.0;
        let u = s.unit(x);
        if u <= s.eta {
            s.f_average + s.g_prev
        } else {
            let w = (u - s.eta) / (1.0 - s.eta);
            s.f_average + s.g_prev + (s.g_next - s.g_prev) * w * w
        }
    }

    fn integral(&self, x: f64) -> f64 {
        let s = &self.0;
        let u = s.unit(x);
        let base = s.f_average * u + s.g_prev * u;
        if u <= s.eta {
            s.prev_primitive + s.x_scaling * base
        } else {
            let eta = s.eta;
            let curve = (s.g_next - s.g_prev) / ((1.0 - eta) * (1.0 - eta))
                * ((u * u * u - eta * eta * eta) / 3.0 - eta * u * u + eta * eta * u);
            s.prev_primitive + s.x_scaling * (base + curve)
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Monotone3(Frame);

impl Monotone3 {
    pub(crate) fn new(
        x_prev: f64,
        x_next: f64,
        g_prev: f64,
        g_next: f64,
        f_average: f64,
        eta: f64,
        prev_primitive: f64,
    ) -> Self {
        Self(Frame {
            x_prev,
            x_scaling: x_next - x_prev,
            g_prev,
            g_next,
            f_average,
            eta,
            prev_primitive,
        })
    }

    fn value(&self, x: f64) -> f64 {
        let s = &self.0;
        let u = s.unit(x);
        if u <= s.eta {
            let w = (s.eta - u) / s.eta;
            s.f_average + s.g_next + (s.g_prev - s.g_next) * w * w
        } else {
            s.f_average + s.g_next
        }
    }

    fn integral(&self, x: f64) -> f64 {
        let s = &self.0;
        let eta = s.eta;
        let scale = (s.g_prev - s.g_next) / (eta * eta);
        let u = s.unit(x);
        let curve = if u <= eta {
            u * u * u / 3.0 - eta * u * u + eta * eta * u
        } else {
            eta * eta * eta / 3.0
        };
        s.prev_primitive + s.x_scaling * (s.f_average * u + s.g_next * u + scale * curve)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Monotone4 {
    frame: Frame,
    a: f64,
    split: Option<Split>,
}

impl Monotone4 {
    pub(crate) fn new(
        x_prev: f64,
        x_next: f64,
        g_prev: f64,
        g_next: f64,
        f_average: f64,
        eta: f64,
        prev_primitive: f64,
    ) -> Self {
        Self {
            a: -0.5 * (eta * g_prev + (1.0 - eta) * g_next),
            frame: Frame {
                x_prev,
                x_scaling: x_next - x_prev,
                g_prev,
                g_next,
                f_average,
                eta,
                prev_primitive,
            },
            split: None,
        }
    }

    /// Variant whose minimum is clamped at zero.
    ///
    /// If the extremum `f_average + a` is not positive, the average is shifted
    /// up so the extremum sits at zero and the shape is compressed around a
    /// zero region that keeps the segment average unchanged.
    pub(crate) fn floored(
        x_prev: f64,
        x_next: f64,
        g_prev: f64,
        g_next: f64,
        f_average: f64,
        eta: f64,
        prev_primitive: f64,
    ) -> Self {
        let mut section = Self::new(x_prev, x_next, g_prev, g_next, f_average, eta, prev_primitive);
        if section.a + section.frame.f_average > 0.0 {
            return section;
        }

        let s = &mut section.frame;
        let f_prev = s.g_prev + s.f_average;
        let f_next = s.g_next + s.f_average;
        let reqd_shift = (s.eta * f_prev + (1.0 - s.eta) * f_next) / 3.0 - s.f_average;
        let reqd_period = reqd_shift * s.x_scaling / (s.f_average + reqd_shift);
        let x_adjust = s.x_scaling - reqd_period;

        s.f_average += reqd_shift;
        s.g_next = f_next - s.f_average;
        s.g_prev = f_prev - s.f_average;
        let a = -(s.eta * s.g_prev + (1.0 - s.eta) * s.g_next) / 2.0;
        let split = Split {
            x2: s.x_prev + x_adjust * s.eta,
            x3: s.x_prev + s.x_scaling - x_adjust * (1.0 - s.eta),
            ratio: x_adjust / s.x_scaling,
        };

        section.a = a;
        section.split = Some(split);
        section
    }

    fn left_value(&self, u: f64) -> f64 {
        let s = &self.frame;
        let w = s.eta - u;
        s.f_average + self.a + (s.g_prev - self.a) * w * w / (s.eta * s.eta)
    }

    fn right_value(&self, u: f64) -> f64 {
        let s = &self.frame;
        let w = u - s.eta;
        s.f_average + self.a + (s.g_next - self.a) * w * w / ((1.0 - s.eta) * (1.0 - s.eta))
    }

    /// Unscaled primitive from 0 to u on the left branch.
    fn left_primitive(&self, u: f64) -> f64 {
        let s = &self.frame;
        let eta = s.eta;
        (s.f_average + self.a + (s.g_prev - self.a) / (eta * eta) * (eta * eta - eta * u + u * u / 3.0))
            * u
    }

    /// Unscaled primitive from 0 to u on the right branch.
    fn right_primitive(&self, u: f64) -> f64 {
        let s = &self.frame;
        let eta = s.eta;
        s.f_average * u
            + self.a * u
            + (s.g_prev - self.a) * (eta / 3.0)
            + (s.g_next - self.a) / ((1.0 - eta) * (1.0 - eta))
                * (u * u * u / 3.0 - eta * u * u + eta * eta * u - eta * eta * eta / 3.0)
    }

    /// Whether u falls on the left branch. A turning point at the left end
    /// leaves no left branch to evaluate.
    fn on_left(&self, u: f64) -> bool {
        u <= self.frame.eta && self.frame.eta > 0.0
    }

    fn branch_value(&self, u: f64) -> f64 {
        if self.on_left(u) {
            self.left_value(u)
        } else {
            self.right_value(u)
        }
    }

    fn branch_primitive(&self, u: f64) -> f64 {
        if self.on_left(u) {
            self.left_primitive(u)
        } else {
            self.right_primitive(u)
        }
    }

    fn value(&self, x: f64) -> f64 {
        let u = self.frame.unit(x);
        match &self.split {
            None => self.branch_value(u),
            Some(split) => split.unit(x, u).map_or(0.0, |v| self.branch_value(v)),
        }
    }

    fn integral(&self, x: f64) -> f64 {
        let s = &self.frame;
        let u = s.unit(x);
        match &self.split {
            None => s.prev_primitive + s.x_scaling * self.branch_primitive(u),
            Some(split) => {
                let scale = s.x_scaling * split.ratio;
                let inner = match split.unit(x, u) {
                    Some(v) => self.branch_primitive(v),
                    None => self.branch_primitive(s.eta),
                };
                s.prev_primitive + scale * inner
            }
        }
    }
}
