// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The text descriptor of a fractal: one value per line, in a fixed
//! order, with no version tag and no optional fields.
//!
//! ```text
//! JULIA | MANDELBROT
//! <constant re> <constant im>     Julia only
//! <alpha re> <alpha im>           Julia only
//! <beta re> <beta im>             Julia only
//! max iteration
//! discrete step
//! x min
//! x max
//! y min
//! y max
//! image width
//! image height
//! file name
//! color alpha
//! color beta
//! color gamma
//! ```
//!
//! Floating point values are written in their shortest exact form, so
//! reading a descriptor back yields the very same fractal.

use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::{FromStr, Lines};

use crate::complex::Complex;
use crate::errors::DescriptorError;
use crate::fractal::{Fractal, FractalConfig, JuliaRule, Kind};

/// Serializes `fractal` to its descriptor.
pub fn to_descriptor(fractal: &Fractal) -> String {
    let plane = fractal.plane();
    let color = fractal.color();
    let mut lines = vec![fractal.kind().name().to_string()];
    if let Kind::Julia(rule) = fractal.kind() {
        lines.push(rule.constant.to_string());
        lines.push(rule.alpha.to_string());
        lines.push(rule.beta.to_string());
    }
    lines.extend(vec![
        fractal.max_iteration().to_string(),
        plane.step().to_string(),
        plane.x_min().to_string(),
        plane.x_max().to_string(),
        plane.y_min().to_string(),
        plane.y_max().to_string(),
        plane.width().to_string(),
        plane.height().to_string(),
        fractal.file_name().to_string(),
        color.alpha.to_string(),
        color.beta.to_string(),
        color.gamma.to_string(),
    ]);
    lines.join("\n") + "\n"
}

struct Fields<'a> {
    lines: Lines<'a>,
}

impl<'a> Fields<'a> {
    fn line(&mut self, field: &'static str) -> Result<&'a str, DescriptorError> {
        self.lines
            .next()
            .map(|line| line.trim_end_matches('\r'))
            .ok_or(DescriptorError::MissingField(field))
    }

    fn parse<T: FromStr>(&mut self, field: &'static str) -> Result<T, DescriptorError> {
        let line = self.line(field)?;
        line.trim().parse().map_err(|_| DescriptorError::InvalidField {
            field,
            value: line.to_string(),
        })
    }

    fn finish(mut self) -> Result<(), DescriptorError> {
        match self.lines.find(|line| !line.trim().is_empty()) {
            Some(line) => Err(DescriptorError::TrailingContent(line.to_string())),
            None => Ok(()),
        }
    }
}

/// Parses a descriptor back into the fractal it describes.
pub fn from_descriptor(text: &str) -> Result<Fractal, DescriptorError> {
    let mut fields = Fields {
        lines: text.lines(),
    };

    let name = fields.line("kind")?.trim();
    let kind = match name {
        "JULIA" => Kind::Julia(JuliaRule {
            constant: fields.parse::<Complex>("complex constant")?,
            alpha: fields.parse::<Complex>("alpha factor")?,
            beta: fields.parse::<Complex>("beta factor")?,
        }),
        "MANDELBROT" => Kind::Mandelbrot,
        other => return Err(DescriptorError::UnknownKind(other.to_string())),
    };

    let config = FractalConfig {
        max_iteration: Some(fields.parse("max iteration")?),
        discrete_step: Some(fields.parse("discrete step")?),
        x_min: Some(fields.parse("x min")?),
        x_max: Some(fields.parse("x max")?),
        y_min: Some(fields.parse("y min")?),
        y_max: Some(fields.parse("y max")?),
        image_width: Some(fields.parse("image width")?),
        image_height: Some(fields.parse("image height")?),
        file_name: Some(fields.line("file name")?.to_string()),
        color_function: Some((
            fields.parse("alpha color")?,
            fields.parse("beta color")?,
            fields.parse("gamma color")?,
        )),
        ..FractalConfig::default()
    };
    fields.finish()?;

    Ok(config.build(kind)?)
}

/// The path `save` writes the descriptor of `fractal` to.
pub fn path_in(dir: &Path, fractal: &Fractal) -> PathBuf {
    dir.join(format!("{}.txt", fractal.file_name()))
}

/// Writes the descriptor of `fractal` to `<dir>/<file name>.txt`.
pub fn save(fractal: &Fractal, dir: &Path) -> Result<PathBuf, DescriptorError> {
    let path = path_in(dir, fractal);
    fs::write(&path, to_descriptor(fractal))?;
    info!("wrote descriptor {}", path.display());
    Ok(path)
}

/// Reads a fractal back from a descriptor file.
pub fn load(path: &Path) -> Result<Fractal, DescriptorError> {
    let text = fs::read_to_string(path)?;
    let fractal = from_descriptor(&text)?;
    info!("read {} descriptor {}", fractal.kind().name(), path.display());
    Ok(fractal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BuildError;
    use rand::Rng;

    fn julia() -> Fractal {
        FractalConfig::default()
            .complex_constant(Complex::new(-0.7269, 0.1889))
            .iteration_function(Complex::new(1.0, 0.5), Complex::new(-0.25, 0.0))
            .max_iteration(500)
            .discrete_step(0.001)
            .rectangle(-1.5, 1.5, -1.0, 1.0)
            .file_name("my julia")
            .color_function(12.5, 0.75, 0.9)
            .julia()
            .unwrap()
    }

    #[test]
    fn julia_descriptor_layout() {
        assert_eq!(
            to_descriptor(&julia()),
            "JULIA\n-0.7269 0.1889\n1 0.5\n-0.25 0\n500\n0.001\n-1.5\n1.5\n-1\n1\n3001\n2001\nmy julia\n12.5\n0.75\n0.9\n"
        );
    }

    #[test]
    fn mandelbrot_descriptor_has_no_julia_lines() {
        let m = FractalConfig::default()
            .discrete_step(0.5)
            .max_iteration(50)
            .mandelbrot()
            .unwrap();
        assert_eq!(
            to_descriptor(&m),
            "MANDELBROT\n50\n0.5\n-2\n1\n-1\n1\n7\n5\nMandelbrot\n20\n1\n1\n"
        );
    }

    #[test]
    fn round_trips() {
        let j = julia();
        assert_eq!(from_descriptor(&to_descriptor(&j)).unwrap(), j);

        let m = Fractal::mandelbrot().unwrap();
        assert_eq!(from_descriptor(&to_descriptor(&m)).unwrap(), m);
    }

    #[test]
    fn round_trips_arbitrary_values() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let x_min: f64 = rng.gen_range(-3.0..0.0);
            let y_min: f64 = rng.gen_range(-3.0..0.0);
            let config = FractalConfig::default()
                .max_iteration(rng.gen_range(1..5000))
                .discrete_step(rng.gen_range(0.0001..0.1))
                .rectangle(x_min, x_min + rng.gen_range(0.1..3.0), y_min, y_min + rng.gen_range(0.1..3.0))
                .image_size(rng.gen_range(1..4000), rng.gen_range(1..4000))
                .color_function(rng.gen(), rng.gen(), rng.gen());
            let fractal = if rng.gen() {
                config
                    .complex_constant(Complex::new(rng.gen(), rng.gen()))
                    .iteration_function(Complex::new(rng.gen(), rng.gen()), Complex::new(rng.gen(), rng.gen()))
                    .julia()
            } else {
                config.mandelbrot()
            }
            .unwrap();
            assert_eq!(from_descriptor(&to_descriptor(&fractal)).unwrap(), fractal);
        }
    }

    #[test]
    fn reads_descriptors_with_java_style_numbers() {
        let text = "MANDELBROT\n1000\n7.5E-4\n-2.0\n1.0\n-1.0\n1.0\n4001\n2667\nMandelbrot\n20.0\n1.0\n1.0\n";
        let m = from_descriptor(text).unwrap();
        assert_eq!(m, Fractal::mandelbrot().unwrap());
    }

    #[test]
    fn tolerates_crlf_and_trailing_blank_lines() {
        let text = to_descriptor(&julia()).replace('\n', "\r\n") + "\r\n\n";
        assert_eq!(from_descriptor(&text).unwrap(), julia());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        match from_descriptor("Sierpinski\n100\n") {
            Err(DescriptorError::UnknownKind(kind)) => assert_eq!(kind, "Sierpinski"),
            other => panic!("expected an unknown kind, got {:?}", other),
        }
        assert!(from_descriptor("julia\n").is_err());
    }

    #[test]
    fn truncated_descriptor_names_the_missing_field() {
        let text = to_descriptor(&julia());
        let truncated: Vec<&str> = text.lines().take(9).collect();
        match from_descriptor(&truncated.join("\n")) {
            Err(DescriptorError::MissingField(field)) => assert_eq!(field, "y max"),
            other => panic!("expected a missing field, got {:?}", other),
        }
        match from_descriptor("") {
            Err(DescriptorError::MissingField(field)) => assert_eq!(field, "kind"),
            other => panic!("expected a missing field, got {:?}", other),
        }
    }

    #[test]
    fn unparsable_fields_are_rejected() {
        let text = "MANDELBROT\nlots\n0.5\n-2\n1\n-1\n1\n7\n5\nM\n20\n1\n1\n";
        match from_descriptor(text) {
            Err(DescriptorError::InvalidField { field, value }) => {
                assert_eq!(field, "max iteration");
                assert_eq!(value, "lots");
            }
            other => panic!("expected an invalid field, got {:?}", other),
        }

        let text = "JULIA\n0 0\n1\n0 0\n";
        match from_descriptor(text) {
            Err(DescriptorError::InvalidField { field, .. }) => assert_eq!(field, "alpha factor"),
            other => panic!("expected an invalid field, got {:?}", other),
        }
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        let text = "MANDELBROT\n50\n0.5\n1\n-2\n-1\n1\n7\n5\nM\n20\n1\n1\n";
        match from_descriptor(text) {
            Err(DescriptorError::Build(BuildError::InvalidRectangle { .. })) => (),
            other => panic!("expected an invalid rectangle, got {:?}", other),
        }
        let text = "MANDELBROT\n50\n0.5\n-2\n1\n-1\n1\n0\n5\nM\n20\n1\n1\n";
        assert!(from_descriptor(text).is_err());
        let text = "MANDELBROT\n50\n0.5\n-2\n1\n-1\n1\n7\n5\nM\nNaN\n1\n1\n";
        match from_descriptor(text) {
            Err(DescriptorError::Build(BuildError::InvalidColor(..))) => (),
            other => panic!("expected an invalid color, got {:?}", other),
        }
    }

    #[test]
    fn trailing_content_is_rejected() {
        let text = to_descriptor(&julia()) + "extra\n";
        match from_descriptor(&text) {
            Err(DescriptorError::TrailingContent(line)) => assert_eq!(line, "extra"),
            other => panic!("expected trailing content, got {:?}", other),
        }
    }

    #[test]
    fn saves_and_loads_files() {
        let dir = tempfile::tempdir().unwrap();
        let fractal = julia();
        let path = save(&fractal, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("my julia.txt"));
        assert_eq!(load(&path).unwrap(), fractal);

        match load(&dir.path().join("missing.txt")) {
            Err(DescriptorError::Io(_)) => (),
            other => panic!("expected an i/o error, got {:?}", other),
        }
    }
}
