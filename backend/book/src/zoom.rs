use serde::Serialize;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 5.0;
pub const ZOOM_STEP: f64 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    pub delta_y: f64,
    pub ctrl_key: bool,
    pub client_x: f64,
    pub client_y: f64,
}

/// Bounding box of the zoomed element, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Scale plus transform origin, the origin given in percent of the element box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ZoomTransform {
    pub scale: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zoom {
    level: f64,
}

impl Default for Zoom {
    fn default() -> Self {
        Self { level: 1.0 }
    }
}

impl Zoom {
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Applies a ctrl+wheel event. Plain scrolling is ignored, and nothing is emitted once the
    /// level is pinned to either bound.
    pub fn wheel(&mut self, event: &WheelEvent, bounds: &Rect) -> Option<ZoomTransform> {
        if !event.ctrl_key {
            return None;
        }

        self.level = (self.level - event.delta_y * ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
        if self.level >= MAX_ZOOM || self.level <= MIN_ZOOM {
            return None;
        }
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return None;
        }

        Some(ZoomTransform {
            scale: self.level,
            origin_x: (event.client_x - bounds.left) / bounds.width * 100.0,
            origin_y: (event.client_y - bounds.top) / bounds.height * 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 200.0,
        height: 100.0,
    };

    fn ctrl_wheel(delta_y: f64) -> WheelEvent {
        WheelEvent {
            delta_y,
            ctrl_key: true,
            client_x: 50.0,
            client_y: 25.0,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn plain_scroll_does_not_zoom() {
        let mut zoom = Zoom::default();
        let event = WheelEvent {
            ctrl_key: false,
            ..ctrl_wheel(-100.0)
        };

        assert_eq!(zoom.wheel(&event, &BODY), None);
        assert_eq!(zoom.level(), 1.0);
    }

    #[test]
    fn scrolling_up_zooms_in_around_the_pointer() {
        let mut zoom = Zoom::default();

        let transform = zoom.wheel(&ctrl_wheel(-100.0), &BODY).unwrap();
        assert!(approx(transform.scale, 1.5));
        assert_eq!(transform.origin_x, 25.0);
        assert_eq!(transform.origin_y, 25.0);
    }

    #[test]
    fn level_is_clamped_to_bounds() {
        let mut zoom = Zoom::default();

        assert_eq!(zoom.wheel(&ctrl_wheel(10_000.0), &BODY), None);
        assert_eq!(zoom.level(), MIN_ZOOM);

        assert_eq!(zoom.wheel(&ctrl_wheel(-10_000.0), &BODY), None);
        assert_eq!(zoom.level(), MAX_ZOOM);

        assert!(zoom.wheel(&ctrl_wheel(100.0), &BODY).is_some());
        assert!(approx(zoom.level(), 4.5));
    }
}
