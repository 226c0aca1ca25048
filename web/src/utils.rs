use anyhow::{Context, anyhow};
use gridlock_core::{Glyph, Tint};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Seed for one validation episode: a forced seed is offset per episode so "try again" differs.
pub(crate) fn episode_seed(forced: Option<u64>, episode: u32) -> u64 {
    match forced {
        Some(seed) => seed.wrapping_add(episode.into()),
        None => js_random_seed(),
    }
}

pub(crate) fn js_err(value: JsValue) -> anyhow::Error {
    anyhow!("{:?}", value)
}

pub(crate) fn context_2d(canvas: &HtmlCanvasElement) -> anyhow::Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(js_err)?
        .context("canvas has no 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("unexpected canvas context type"))
}

pub(crate) const GRID_STROKE: &str = "white";
pub(crate) const SELECTION_FILL: &str = "rgba(255,255,255,0.3)";

/// Fill colour of a glyph, plain white when tints are not part of the challenge.
pub(crate) const fn glyph_fill(glyph: Glyph, tinted: bool) -> &'static str {
    if !tinted {
        return "rgba(255,255,255,0.6)";
    }
    match glyph.tint {
        Tint::Red => "rgba(230,40,40,0.8)",
        Tint::Green => "rgba(40,200,70,0.8)",
        Tint::Blue => "rgba(40,90,230,0.8)",
    }
}
