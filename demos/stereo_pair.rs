//! # Stereo pair
//!
//! Computes the disparity of a pair of images on disk and saves it as an image.
//!
//! ```text
//! cargo run --release --example stereo_pair -- left.png right.png [disparity.png] [params.json]
//! ```

use std::time::Instant;

use lbp_disparity::{prefilter, prelude::*};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("usage: stereo_pair LEFT RIGHT [OUTPUT] [PARAMS_JSON]");
        std::process::exit(2);
    }

    let start = Instant::now();

    let output = args.get(2).map(String::as_str).unwrap_or("disparity.png");
    let params = match args.get(3) {
        Some(path) => Params::from_json_file(path)?,
        None => Params::default()
    };

    // Load and smooth images
    let pair = StereoPair::open(&args[0], &args[1])?.prefiltered(prefilter::DEFAULT_SIGMA);

    println!("Iter.\tEnergy");
    println!("--------------");

    let outcome = LoopyBp::new(params).run(&pair, |it, _| {
        println!("{}\t{}", it.index, it.energy);
    })?;

    outcome.disparity.save(output)?;

    #[cfg(feature = "statistics")]
    lbp_disparity::statistics::plot_energy("energy.png", &outcome.energies)?;

    println!("\nRunning Time: {} ms", start.elapsed().as_secs_f64() * 1000.0);

    Ok(())
}
