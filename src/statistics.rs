//! # Run statistics
//!
//! Plots of solver progress, available with the `statistics` feature.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::Path;

use plotters::prelude::*;

use crate::error::*;

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Draw the energy of each iteration as a line chart into a PNG at `path`.
pub fn plot_energy<P: AsRef<Path>>(path: P, energies: &[u64]) -> Result<()> {
    let max_energy = energies.iter().copied().max().unwrap_or(0) + 1;
    let iterations = energies.len() as u64 + 1;

    let area = BitMapBackend::new(path.as_ref(), (800, 600)).into_drawing_area();
    area.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&area)
        .caption("Energy per iteration", ("sans-serif", 20).into_font())
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_ranged(0u64..iterations, 0u64..max_energy)
        .map_err(plot_err)?;

    chart.configure_mesh().draw().map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            energies.iter().enumerate().map(|(i, &e)| (i as u64 + 1, e)),
            &RED
        ))
        .map_err(plot_err)?
        .label("Energy")
        .legend(|(x, y)| 
            PathElement::new(vec![(x, y), (x + 20, y)], &RED
        ));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

fn plot_err<E: std::fmt::Debug>(e: E) -> Error {
    Error::Plot(format!("{:?}", e))
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
