//! Embedded label font.
//!
//! Tick labels and the legend caption are rasterised with `ab_glyph` from a
//! font compiled into the binary, so charts look the same on every host
//! whether or not it has system fonts installed.

use crate::error::{RenderError, RenderResult};
use once_cell::sync::OnceCell;
use plotters::style::{register_font, FontStyle};
use tracing::debug;

/// Family name the font is registered under. Plotters asks for it for both
/// axis labels and series labels.
pub const FONT_FAMILY: &str = "sans-serif";

static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

static REGISTERED: OnceCell<bool> = OnceCell::new();

/// Registers the embedded font with plotters, once per process.
pub fn ensure_fonts() -> RenderResult<()> {
    let registered = *REGISTERED.get_or_init(|| {
        let ok = register_font(FONT_FAMILY, FontStyle::Normal, DEJAVU_SANS).is_ok();
        debug!(family = FONT_FAMILY, ok, "registered label font");
        ok
    });

    if registered {
        Ok(())
    } else {
        Err(RenderError::Font(FONT_FAMILY))
    }
}
