use clap::{Parser, ValueEnum};
use gridlock_core::{ChallengeConfig, GridSize, Variant};
use wasm_bindgen::prelude::*;

mod app;
mod camera;
mod challenge;
mod utils;

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
enum VariantArg {
    ShapeOnly,
    ShapeAndTint,
}

impl From<VariantArg> for Variant {
    fn from(other: VariantArg) -> Self {
        match other {
            VariantArg::ShapeOnly => Variant::ShapeOnly,
            VariantArg::ShapeAndTint => Variant::ShapeAndTint,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid rows
    #[arg(long)]
    rows: Option<u8>,

    /// Grid columns
    #[arg(long)]
    cols: Option<u8>,

    /// Wrong submissions allowed before lockout
    #[arg(long)]
    max_attempts: Option<u16>,

    /// Whether the target includes a tint
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Probability of a cell carrying a shape
    #[arg(long)]
    shape_probability: Option<f64>,

    /// Always draw the target from the grid
    #[arg(long)]
    require_satisfiable: bool,
}

impl Args {
    fn challenge_config(&self) -> ChallengeConfig {
        let mut config = ChallengeConfig::default();
        let defaults = config.size;
        config.size = GridSize::new(
            self.rows.unwrap_or(defaults.rows),
            self.cols.unwrap_or(defaults.cols),
        );
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if let Some(variant) = self.variant {
            config.variant = variant.into();
        }
        config.shape_probability = self.shape_probability;
        config.require_satisfiable = self.require_satisfiable;
        config
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("seed: {:?}", args.seed);

    let config = args.challenge_config();
    if let Err(err) = config.validate() {
        log::error!("invalid challenge settings: {}", err);
    }

    let root = document()
        .get_element_by_id("gridlock")
        .expect("Could not find id=\"gridlock\" element");

    log::debug!("App started");
    let props = app::AppProps {
        config,
        seed: args.seed,
    };
    yew::Renderer::<app::App>::with_root_and_props(root, props).render();
}
