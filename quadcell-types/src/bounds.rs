use geo::Rect;
use serde::{Deserialize, Serialize};

/// A real-valued rectangle that a cell grid is laid over.
///
/// Unlike `geo::Rect`, the corners are kept exactly as given so degenerate
/// or inverted input can be detected by [`Bounds::validate`] instead of
/// being silently normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from minimum and maximum coordinates.
    ///
    /// No validation happens here; call [`Bounds::validate`] before use.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadcell_types::bounds::Bounds;
    ///
    /// let bounds = Bounds::new(0.0, 0.0, 4.0, 4.0);
    /// assert_eq!(bounds.width(), 4.0);
    /// ```
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create bounds from a `geo::Rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check that all bounds are finite and that min < max on both axes.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadcell_types::bounds::Bounds;
    ///
    /// assert!(Bounds::new(0.0, 0.0, 1.0, 1.0).validate().is_ok());
    /// assert!(Bounds::new(1.0, 0.0, 1.0, 1.0).validate().is_err());
    /// assert!(Bounds::new(0.0, f64::NAN, 1.0, 1.0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        let all = [self.min_x, self.min_y, self.max_x, self.max_y];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(format!("Bounds must be finite, got: {:?}", self));
        }

        if self.min_x >= self.max_x {
            return Err(format!(
                "min_x must be less than max_x, got: {} >= {}",
                self.min_x, self.max_x
            ));
        }

        if self.min_y >= self.max_y {
            return Err(format!(
                "min_y must be less than max_y, got: {} >= {}",
                self.min_y, self.max_y
            ));
        }

        if !self.width().is_finite() || !self.height().is_finite() {
            return Err(format!(
                "Bounds span must be finite, got width {} and height {}",
                self.width(),
                self.height()
            ));
        }

        Ok(())
    }

    /// Whether (x, y) lies inside the rectangle, edges included.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Clamp (x, y) into the rectangle.
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x.clamp(self.min_x, self.max_x),
            y.clamp(self.min_y, self.max_y),
        )
    }

    /// Convert to a `geo::Rect`.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            geo::coord! { x: self.min_x, y: self.min_y },
            geo::coord! { x: self.max_x, y: self.max_y },
        )
    }
}

impl From<Bounds> for Rect {
    fn from(bounds: Bounds) -> Self {
        bounds.to_rect()
    }
}
