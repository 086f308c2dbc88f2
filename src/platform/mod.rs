//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Play-area sizing from the viewport
//! - Drawing onto a 2D canvas (wasm32 only)

use crate::sim::Bounds;

/// Largest short side of the play area (px)
pub const MAX_BOARD_SIDE: f64 = 600.0;
/// Long side over short side
pub const BOARD_ASPECT: f64 = 1.5;

/// Pick a play-area size for a viewport
///
/// `reserved_height` is taken by the UI above the board and `border` is the
/// board's CSS border width. Wide viewports get a landscape board, tall ones
/// a portrait board. The long side is shrunk, keeping the aspect ratio, when
/// it would not fit.
pub fn board_size(
    viewport_width: f64,
    viewport_height: f64,
    reserved_height: f64,
    border: f64,
) -> Bounds {
    let available_height = viewport_height - reserved_height;
    let max_width = (viewport_width - 2.0 * border).max(1.0);
    let max_height = (available_height - 2.0 * border).max(1.0);

    if available_height / viewport_width < 1.0 {
        let height = MAX_BOARD_SIDE.min(max_height);
        let width = (height * BOARD_ASPECT).min(max_width);
        Bounds::new(width, width / BOARD_ASPECT)
    } else {
        let width = MAX_BOARD_SIDE.min(max_width);
        let height = (width * BOARD_ASPECT).min(max_height);
        Bounds::new(height / BOARD_ASPECT, height)
    }
}

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

#[cfg(target_arch = "wasm32")]
mod canvas {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use crate::Point;
    use crate::render::Surface;

    /// [`Surface`] over a canvas element's 2D context
    ///
    /// Coordinates are CSS pixels; the backing store is scaled by the device
    /// pixel ratio so lines stay sharp.
    pub struct CanvasSurface {
        context: CanvasRenderingContext2d,
        width: f64,
        height: f64,
    }

    impl CanvasSurface {
        /// Size `canvas` to `width` x `height` CSS pixels and grab its 2D context
        pub fn new(canvas: &HtmlCanvasElement, width: f64, height: f64) -> Result<Self, JsValue> {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());

            let style = canvas.style();
            style.set_property("width", &format!("{}px", width))?;
            style.set_property("height", &format!("{}px", height))?;
            canvas.set_width((width * dpr).floor() as u32);
            canvas.set_height((height * dpr).floor() as u32);

            let context: CanvasRenderingContext2d = canvas
                .get_context("2d")?
                .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
                .dyn_into()?;
            context.scale(dpr, dpr)?;
            context.set_line_cap("round");
            context.set_line_join("round");

            Ok(Self {
                context,
                width,
                height,
            })
        }
    }

    impl Surface for CanvasSurface {
        fn size(&self) -> (f64, f64) {
            (self.width, self.height)
        }

        fn clear(&mut self) {
            self.context.clear_rect(0.0, 0.0, self.width, self.height);
        }

        fn polyline(&mut self, points: &[Point], color: &str, width: f64) {
            let Some((first, rest)) = points.split_first() else {
                return;
            };
            let ctx = &self.context;
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(width);
            ctx.begin_path();
            ctx.move_to(first.x, first.y);
            for p in rest {
                ctx.line_to(p.x, p.y);
            }
            ctx.stroke();
        }

        fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
            let ctx = &self.context;
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            if ctx
                .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
                .is_ok()
            {
                ctx.fill();
            }
        }

        fn ring(&mut self, center: Point, radius: f64, color: &str, width: f64) {
            let ctx = &self.context;
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(width);
            ctx.begin_path();
            if ctx
                .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
                .is_ok()
            {
                ctx.stroke();
            }
        }

        fn bar(&mut self, x: f64, top: f64, bottom: f64, color: &str, width: f64) {
            let ctx = &self.context;
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(width);
            ctx.begin_path();
            ctx.move_to(x, top);
            ctx.line_to(x, bottom);
            ctx.stroke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_board() {
        // 1200 x 800 viewport with 100px of UI: wide, so the height is the short side
        let bounds = board_size(1200.0, 800.0, 100.0, 2.0);
        assert_eq!(bounds.height, 600.0);
        assert_eq!(bounds.width, 900.0);

        let bounds = board_size(1200.0, 500.0, 100.0, 2.0);
        assert_eq!(bounds.height, 396.0);
        assert_eq!(bounds.width, 594.0);
    }

    #[test]
    fn test_landscape_board_fits_narrow_viewport() {
        // 546px tall would need 819px of width; only 696 are available
        let bounds = board_size(700.0, 650.0, 100.0, 2.0);
        assert_eq!(bounds.width, 696.0);
        assert!((bounds.height - 464.0).abs() < 1e-9);
        assert!(bounds.width <= 700.0 - 4.0);
    }

    #[test]
    fn test_portrait_board() {
        let bounds = board_size(400.0, 900.0, 100.0, 5.0);
        assert_eq!(bounds.width, 390.0);
        assert_eq!(bounds.height, 585.0);
    }

    #[test]
    fn test_portrait_board_fits_short_viewport() {
        // 500px wide would need 750px of height; only 600 are available
        let bounds = board_size(500.0, 700.0, 100.0, 0.0);
        assert_eq!(bounds.height, 600.0);
        assert_eq!(bounds.width, 400.0);
    }
}
