use crate::consts::{MAX_SCALE, MIN_SCALE, ZOOM_STEP};

/// A 2D point or displacement, in either image or screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Wheel direction for a single zoom step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Positive wheel delta zooms in, negative zooms out, zero does nothing.
    pub fn from_wheel(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(ZoomDirection::In)
        } else if delta < 0.0 {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }

    fn factor(self) -> f64 {
        match self {
            ZoomDirection::In => ZOOM_STEP,
            ZoomDirection::Out => 1.0 / ZOOM_STEP,
        }
    }
}

/// Scale + offset mapping image space to screen space for one pane:
/// `screen = scale * image + offset`.
///
/// Screen coordinates are relative to the pane's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    scale: f64,
    offset: Point,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewportTransform {
    /// Native scale, image origin at the pane origin.
    pub const fn identity() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ZERO,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    pub fn to_screen(&self, image: Point) -> Point {
        Point::new(
            image.x * self.scale + self.offset.x,
            image.y * self.scale + self.offset.y,
        )
    }

    pub fn to_image(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    /// Zoom one step keeping the image point under `anchor` fixed on screen.
    ///
    /// The resulting scale is clamped to [`MIN_SCALE`, `MAX_SCALE`]; at the
    /// limits the step is a no-op.
    pub fn zoom_at(&mut self, anchor: Point, direction: ZoomDirection) {
        let target = (self.scale * direction.factor()).clamp(MIN_SCALE, MAX_SCALE);
        self.set_scale_at(anchor, target);
    }

    /// Set an absolute scale keeping the image point under `anchor` fixed.
    pub fn set_scale_at(&mut self, anchor: Point, scale: f64) {
        let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        let pinned = self.to_image(anchor);
        self.scale = scale;
        self.offset = Point::new(anchor.x - pinned.x * scale, anchor.y - pinned.y * scale);
    }

    /// Move the content along with the pointer. The scroll position (the
    /// negated offset) drops by `delta`, so dragging right reveals content
    /// to the left.
    pub fn pan_by(&mut self, delta: Point) {
        self.offset = self.offset + delta;
    }

    /// Fit `image_size` inside `view_size` and center it.
    pub fn fit(&mut self, image_size: Point, view_size: Point) {
        if image_size.x <= 0.0 || image_size.y <= 0.0 {
            return;
        }
        let scale = (view_size.x / image_size.x)
            .min(view_size.y / image_size.y)
            .clamp(MIN_SCALE, MAX_SCALE);
        self.scale = scale;
        self.offset = Point::new(
            (view_size.x - image_size.x * scale) / 2.0,
            (view_size.y - image_size.y * scale) / 2.0,
        );
    }
}
