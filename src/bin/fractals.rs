// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate fractals;
extern crate log;
extern crate num_cpus;

use clap::{App, Arg, ArgGroup, ArgMatches};
use failure::{format_err, Error};
use log::info;
use std::path::Path;
use std::str::FromStr;

use fractals::descriptor;
use fractals::{Complex, Fractal, FractalConfig, GridFill, PixelGrid, Quadrant};

/// Splits `s` on `;` and parses exactly `n` values out of it.
fn parse_list<T: FromStr>(s: &str, n: usize) -> Option<Vec<T>> {
    let values: Vec<T> = s
        .split(';')
        .map(|v| T::from_str(v.trim()).ok())
        .collect::<Option<Vec<T>>>()?;
    if values.len() == n {
        Some(values)
    } else {
        None
    }
}

fn validate_list<T: FromStr>(s: &str, n: usize, err: &str) -> Result<(), String> {
    match parse_list::<T>(s, n) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

fn parse_quadrant(s: &str) -> Option<Quadrant> {
    match s {
        "top-left" => Some(Quadrant::TopLeft),
        "top-right" => Some(Quadrant::TopRight),
        "bottom-left" => Some(Quadrant::BottomLeft),
        "bottom-right" => Some(Quadrant::BottomRight),
        _ => None,
    }
}

const JULIA: &str = "julia";
const MANDELBROT: &str = "mandelbrot";
const LOAD: &str = "load";
const MAX_ITERATION: &str = "max-iteration";
const STEP: &str = "step";
const X_MIN: &str = "x-min";
const X_MAX: &str = "x-max";
const Y_MIN: &str = "y-min";
const Y_MAX: &str = "y-max";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const NAME: &str = "name";
const COLOR: &str = "color";
const CONSTANT: &str = "constant";
const ITERATION: &str = "iteration";
const ZOOM: &str = "zoom";
const DIVISIONS: &str = "divisions";
const OUTPUT: &str = "output";

fn number(
    name: &'static str,
    help: &'static str,
    validator: fn(String) -> Result<(), String>,
) -> Arg<'static, 'static> {
    Arg::with_name(name)
        .long(name)
        .takes_value(true)
        .allow_hyphen_values(true)
        .validator(validator)
        .help(help)
}

fn args<'a>() -> ArgMatches<'a> {
    let max_divisions = 8 * num_cpus::get();

    App::new("fractals")
        .version("0.1.0")
        .about("Renders Julia and Mandelbrot sets to PNG")
        .arg(Arg::with_name(JULIA).long(JULIA).short("j").help("Render a Julia set"))
        .arg(
            Arg::with_name(MANDELBROT)
                .long(MANDELBROT)
                .short("m")
                .help("Render the Mandelbrot set"),
        )
        .arg(
            Arg::with_name(LOAD)
                .long(LOAD)
                .short("l")
                .takes_value(true)
                .help("Render the fractal described by a descriptor file"),
        )
        .group(
            ArgGroup::with_name("fractal")
                .args(&[JULIA, MANDELBROT, LOAD])
                .required(true),
        )
        .arg(
            number(MAX_ITERATION, "Maximum number of iterations per point", |s| {
                validate::<u32>(&s, "Could not parse iteration count")
            })
            .short("i")
            .conflicts_with(LOAD),
        )
        .arg(
            number(STEP, "Distance between sampled points", |s| {
                validate::<f64>(&s, "Could not parse discrete step")
            })
            .short("s")
            .conflicts_with(LOAD),
        )
        .arg(
            number(X_MIN, "Left edge of the complex plane", |s| {
                validate::<f64>(&s, "Could not parse x-min")
            })
            .conflicts_with(LOAD),
        )
        .arg(
            number(X_MAX, "Right edge of the complex plane", |s| {
                validate::<f64>(&s, "Could not parse x-max")
            })
            .conflicts_with(LOAD),
        )
        .arg(
            number(Y_MIN, "Bottom edge of the complex plane", |s| {
                validate::<f64>(&s, "Could not parse y-min")
            })
            .conflicts_with(LOAD),
        )
        .arg(
            number(Y_MAX, "Top edge of the complex plane", |s| {
                validate::<f64>(&s, "Could not parse y-max")
            })
            .conflicts_with(LOAD),
        )
        .arg(
            number(WIDTH, "Image width, derived from the step when omitted", |s| {
                validate::<usize>(&s, "Could not parse image width")
            })
            .requires(HEIGHT)
            .conflicts_with(LOAD),
        )
        .arg(
            number(HEIGHT, "Image height, derived from the step when omitted", |s| {
                validate::<usize>(&s, "Could not parse image height")
            })
            .requires(WIDTH)
            .conflicts_with(LOAD),
        )
        .arg(
            Arg::with_name(NAME)
                .long(NAME)
                .short("n")
                .takes_value(true)
                .conflicts_with(LOAD)
                .help("Name of the output files, without extension"),
        )
        .arg(
            number(COLOR, "Color function as \"alpha;beta;gamma\"", |s| {
                validate_list::<f32>(&s, 3, "Color function must be three numbers separated by ';'")
            })
            .short("c")
            .conflicts_with(LOAD),
        )
        .arg(
            number(CONSTANT, "Julia constant as \"re;im\"", |s| {
                validate_list::<f64>(&s, 2, "Constant must be two numbers separated by ';'")
            })
            .requires(JULIA),
        )
        .arg(
            number(ITERATION, "Julia rule alpha·z² + beta·z as \"alpha re;alpha im;beta re;beta im\"", |s| {
                validate_list::<f64>(&s, 4, "Iteration function must be four numbers separated by ';'")
            })
            .requires(JULIA),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .possible_values(&["top-left", "top-right", "bottom-left", "bottom-right"])
                .help("Zoom into one quarter of the fractal before rendering"),
        )
        .arg(
            Arg::with_name(DIVISIONS)
                .long(DIVISIONS)
                .short("d")
                .takes_value(true)
                .default_value("8")
                .validator(move |s| match usize::from_str(&s) {
                    Ok(d) if d >= 1 && d <= max_divisions => Ok(()),
                    Ok(_) => Err(format!("Divisions must be between 1 and {}", max_divisions)),
                    Err(_) => Err("Could not parse divisions".to_string()),
                })
                .help("Split the image into about this many column ranges"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value(".")
                .help("Directory receiving the PNG and descriptor files"),
        )
        .get_matches()
}

/// Reads a value clap has already validated.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Option<T> {
    matches.value_of(name).and_then(|s| T::from_str(s).ok())
}

fn list<T: FromStr>(matches: &ArgMatches, name: &str, n: usize) -> Option<Vec<T>> {
    matches.value_of(name).and_then(|s| parse_list(s, n))
}

fn config(matches: &ArgMatches) -> FractalConfig {
    let mut config = FractalConfig {
        max_iteration: value(matches, MAX_ITERATION),
        discrete_step: value(matches, STEP),
        x_min: value(matches, X_MIN),
        x_max: value(matches, X_MAX),
        y_min: value(matches, Y_MIN),
        y_max: value(matches, Y_MAX),
        image_width: value(matches, WIDTH),
        image_height: value(matches, HEIGHT),
        file_name: matches.value_of(NAME).map(String::from),
        ..FractalConfig::default()
    };
    if let Some(c) = list::<f32>(matches, COLOR, 3) {
        config = config.color_function(c[0], c[1], c[2]);
    }
    if let Some(c) = list::<f64>(matches, CONSTANT, 2) {
        config = config.complex_constant(Complex::new(c[0], c[1]));
    }
    if let Some(f) = list::<f64>(matches, ITERATION, 4) {
        config = config.iteration_function(Complex::new(f[0], f[1]), Complex::new(f[2], f[3]));
    }
    config
}

fn fractal(matches: &ArgMatches) -> Result<Fractal, Error> {
    let fractal = match matches.value_of(LOAD) {
        Some(path) => descriptor::load(Path::new(path))?,
        None if matches.is_present(JULIA) => config(matches).julia()?,
        None => config(matches).mandelbrot()?,
    };
    match matches.value_of(ZOOM) {
        Some(zone) => {
            let quadrant =
                parse_quadrant(zone).ok_or_else(|| format_err!("unknown zoom zone {}", zone))?;
            Ok(fractal.zoom(quadrant)?)
        }
        None => Ok(fractal),
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let fractal = fractal(matches)?;
    let divisions = value(matches, DIVISIONS).unwrap_or(8);
    let output = Path::new(matches.value_of(OUTPUT).unwrap_or("."));

    info!(
        "rendering {} {}x{} into {}",
        fractal.kind().name(),
        fractal.width(),
        fractal.height(),
        output.display()
    );
    let grid = GridFill::new(divisions).fill(&fractal);
    let pixels = PixelGrid::paint(&grid, &fractal);

    let png = output.join(format!("{}.png", fractal.file_name()));
    pixels.as_image().save(&png)?;
    let txt = descriptor::save(&fractal, output)?;
    println!("{}", png.display());
    println!("{}", txt.display());
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
