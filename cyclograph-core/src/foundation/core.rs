use std::ops::{Add, AddAssign, Mul, Sub};

use kurbo::Point;

/// A complex number over `f64`, used for path samples and Fourier coefficients.
///
/// The real axis is the SVG x axis and the imaginary axis the SVG y axis, so a
/// sampled point `(x, y)` is the value `x + iy`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Complex {
    /// Real part (x).
    pub re: f64,
    /// Imaginary part (y).
    pub im: f64,
}

impl Complex {
    /// The additive identity.
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// Build a complex number from its parts.
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Modulus `|z|`.
    pub fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Argument in `(-pi, pi]`, via `atan2`.
    pub fn phase(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Scale by a real factor.
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.re * k, self.im * k)
    }

    /// Multiply by the imaginary unit (a quarter turn).
    pub fn mul_i(self) -> Self {
        Self::new(-self.im, self.re)
    }

    /// Rotate by `angle` radians, i.e. multiply by `e^(i*angle)`.
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.re * cos - self.im * sin,
            self.re * sin + self.im * cos,
        )
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl From<Point> for Complex {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Canvas dimensions in SVG user units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in user units.
    pub width: f64,
    /// Height in user units.
    pub height: f64,
}

impl Canvas {
    /// Build a canvas, scaled uniformly by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}
