extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelbrot;
extern crate num_cpus;

use clap::{App, AppSettings, Arg, ArgMatches};
use mandelbrot::{paint, parse_size, Bitmap, Grid, RenderError, Renderer, Schedule};
use std::str::FromStr;
use std::time::Instant;

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const SIZE: &str = "size";
const OUTPUT: &str = "output";
const THREADS: &str = "threads";
const SCHEDULE: &str = "schedule";

fn args<'a>(max_threads: usize, default_threads: &'a str) -> ArgMatches<'a> {
    App::new("mandelbrot")
        .version("0.1.0")
        .about("Renders the Mandelbrot set to an N×N bitmap")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::with_name(SIZE)
                .required(true)
                .index(1)
                .validator(|s| parse_size(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help("Side length of the square output image, in pixels"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("mandelbrot.bmp")
                .help("Output file"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(default_threads)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(SCHEDULE)
                .required(false)
                .long(SCHEDULE)
                .short("s")
                .takes_value(true)
                .possible_values(&["dynamic", "static"])
                .default_value("dynamic")
                .help("How pixels are handed out to threads"),
        )
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<Grid, RenderError> {
    let size = parse_size(matches.value_of(SIZE).unwrap_or_default())?;
    let output = matches.value_of(OUTPUT).unwrap_or("mandelbrot.bmp");
    let threads = matches
        .value_of(THREADS)
        .and_then(|t| usize::from_str(t).ok())
        .unwrap_or_else(num_cpus::get);
    let schedule = matches
        .value_of(SCHEDULE)
        .and_then(|s| Schedule::from_str(s).ok())
        .unwrap_or_default();

    let grid = Grid::new(size)?;
    let renderer = Renderer::new(grid)?;
    let iterations = renderer.render(threads, schedule)?;

    let mut bitmap = Bitmap::new(size, size)?;
    paint(&iterations, grid.max_iterations, &mut bitmap);
    drop(iterations);
    bitmap.save(output)?;
    info!("wrote {}", output);
    Ok(grid)
}

fn main() {
    env_logger::init();

    let max_threads = num_cpus::get();
    let default_threads = max_threads.to_string();
    let matches = args(max_threads, &default_threads);

    let started = Instant::now();
    match run(&matches) {
        Err(e) => {
            error!("render failed: {}", e);
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(grid) => {
            let elapsed = started.elapsed();
            println!(
                "Rendered {}x{} Mandelbrot in {}.{:03}s (max iterations: {}, threshold: {})",
                grid.size,
                grid.size,
                elapsed.as_secs(),
                elapsed.subsec_millis(),
                grid.max_iterations,
                grid.threshold
            );
        }
    }
}
