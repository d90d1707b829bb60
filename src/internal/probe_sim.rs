#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(clippy::unwrap_used)]
#![allow(warnings)]

//! Probing simulation: measures insertion probe counts for the quadratic
//! scheme used by `quadmap` against alternatives, across a sweep of load
//! factors, and renders the results as charts. This is what makes the
//! "prime capacity reduces clustering" design choice observable.

use plotters::prelude::*;
use rand::Rng;

// A prime and a power of two of comparable size, so the same key stream
// produces comparable load factors.
const PRIME_CAPACITY: usize = 100_003;
const POW2_CAPACITY: usize = 131_072;
// Load factors from 0.1 to 0.95
const NUM_LOAD_FACTORS: usize = 10;
const MAX_PROBES: usize = 200; // Prevent unbounded walks at high load

const METHODS: [&str; 3] =
    ["Quadratic (prime)", "Quadratic (power of two)", "Linear (prime)"];

// Fibonacci multiplicative spread, standing in for a full hash function
fn spread(key: u64) -> u64 {
    key.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

// Quadratic probing: (hash + k^2) mod capacity, the scheme quadmap uses
fn quadratic_probing(table: &mut Vec<bool>, key: u64) -> usize {
    let capacity = table.len();
    let hash = (spread(key) % capacity as u64) as usize;
    let mut index = hash;
    let mut k = 0usize;
    let mut probes = 1;

    while table[index] && probes < MAX_PROBES {
        k += 1;
        index = (hash + k * k) % capacity;
        probes += 1;
    }

    if !table[index] {
        table[index] = true;
    }

    probes
}

// Linear probing baseline: (hash + k) mod capacity
fn linear_probing(table: &mut Vec<bool>, key: u64) -> usize {
    let capacity = table.len();
    let mut index = (spread(key) % capacity as u64) as usize;
    let mut probes = 1;

    while table[index] && probes < MAX_PROBES {
        index = (index + 1) % capacity;
        probes += 1;
    }

    if !table[index] {
        table[index] = true;
    }

    probes
}

fn capacity_for(method: &str) -> usize {
    if method.contains("power of two") { POW2_CAPACITY } else { PRIME_CAPACITY }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate load factors from 0.1 to 0.95
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    println!("Load factors: {:?}", load_factors);

    // Results storage
    let mut average_probes: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];
    let mut worst_case_probes: Vec<Vec<usize>> = vec![Vec::new(); METHODS.len()];

    // Generate random keys outside the loop to ensure fair comparison
    let mut rng = rand::rng();
    let max_keys_needed = (POW2_CAPACITY as f64 * 0.95) as usize;
    let keys: Vec<u64> =
        (0..max_keys_needed).map(|_| rng.random_range(1..u64::MAX)).collect();

    for &load in &load_factors {
        println!("Testing at load factor {:.2}", load);

        for (method_idx, &method) in METHODS.iter().enumerate() {
            let capacity = capacity_for(method);
            let n_keys = (capacity as f64 * load) as usize;
            let mut table: Vec<bool> = vec![false; capacity];
            let mut probes_list: Vec<usize> = Vec::with_capacity(n_keys);

            for &key in keys.iter().take(n_keys) {
                let probes = match method {
                    "Quadratic (prime)" | "Quadratic (power of two)" => {
                        quadratic_probing(&mut table, key)
                    }
                    "Linear (prime)" => linear_probing(&mut table, key),
                    _ => panic!("Unknown method"),
                };
                probes_list.push(probes);
            }

            let avg = probes_list.iter().sum::<usize>() as f64 / probes_list.len() as f64;
            let worst = *probes_list.iter().max().unwrap_or(&0);

            average_probes[method_idx].push(avg);
            worst_case_probes[method_idx].push(worst);

            println!("  {}: Avg probes = {:.2}, Worst = {}", method, avg, worst);
        }
    }

    // Plot configuration
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
        RGBColor(50, 180, 50), // Bright green
    ];
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    // Plot 1: Average probes per insertion
    let root = BitMapBackend::new("average_probes.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_avg = average_probes
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Insertion Probes by Probing Scheme", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(load_factors.len() - 1), 0.0..max_avg)?;

    let x_labels: Vec<String> =
        load_factors.iter().map(|&l| format!("{:.2}", l)).collect();

    chart
        .configure_mesh()
        .x_labels(load_factors.len() - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Load Factor")
        .y_desc("Average Probes per Insertion")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    // Mark the 49% growth threshold quadmap never exceeds
    let threshold_x = load_factors
        .iter()
        .position(|&l| l >= 0.49)
        .unwrap_or(load_factors.len() - 1);
    let reference_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
    chart
        .draw_series(LineSeries::new(
            vec![(threshold_x, 0.0), (threshold_x, max_avg)],
            reference_style,
        ))?
        .label("49% growth threshold")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], reference_style));

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..load_factors.len() - 1).map(|i| (i, average_probes[method_idx][i])),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series((0..load_factors.len() - 1).map(|i| {
            Circle::new((i, average_probes[method_idx][i]), marker_size, color.filled())
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: Worst-case probes per insertion
    let root = BitMapBackend::new("worst_case_probes.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_worst = worst_case_probes
        .iter()
        .flat_map(|v| v.iter())
        .fold(0, |max, &x| if x > max { x } else { max }) as f64 *
        1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Worst-Case Insertion Probes by Probing Scheme", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(load_factors.len() - 1), 0.0..max_worst)?;

    chart
        .configure_mesh()
        .x_labels(load_factors.len() - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Load Factor")
        .y_desc("Worst-Case Probes")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..load_factors.len() - 1)
                    .map(|i| (i, worst_case_probes[method_idx][i] as f64)),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series((0..load_factors.len() - 1).map(|i| {
            Circle::new(
                (i, worst_case_probes[method_idx][i] as f64),
                marker_size,
                color.filled(),
            )
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!("Wrote average_probes.png and worst_case_probes.png");

    Ok(())
}
