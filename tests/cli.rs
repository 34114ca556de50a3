// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate assert_cmd;
extern crate fractals;
extern crate predicates;
extern crate tempfile;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

use fractals::descriptor;

fn fractals() -> Command {
    Command::cargo_bin("fractals").unwrap()
}

#[test]
fn renders_a_mandelbrot_png_and_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    fractals()
        .args(&["--mandelbrot", "--step", "0.05", "--max-iteration", "50", "--name", "small"])
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("small.png").and(predicate::str::contains("small.txt")));

    let image = image::open(dir.path().join("small.png")).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (61, 41));

    let fractal = descriptor::load(&dir.path().join("small.txt")).unwrap();
    assert_eq!(fractal.max_iteration(), 50);
    assert_eq!(fractal.file_name(), "small");
    assert_eq!((fractal.width(), fractal.height()), (61, 41));
}

#[test]
fn renders_a_julia_set_with_negative_values() {
    let dir = tempfile::tempdir().unwrap();
    fractals()
        .args(&[
            "--julia",
            "--constant",
            "-0.8;0.156",
            "--iteration",
            "1;0;0;0",
            "--x-min",
            "-1.5",
            "--x-max",
            "1.5",
            "--step",
            "0.1",
            "--max-iteration",
            "40",
            "--color",
            "10;0.8;0.9",
            "--name",
            "julia",
        ])
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("julia.txt")).unwrap();
    assert!(text.starts_with("JULIA\n-0.8 0.156\n1 0\n0 0\n40\n0.1\n-1.5\n1.5\n"));
    assert!(text.ends_with("julia\n10\n0.8\n0.9\n"));
}

#[test]
fn reloads_and_zooms_a_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    fractals()
        .args(&["--mandelbrot", "--step", "0.1", "--max-iteration", "30", "--name", "zoomed"])
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success();
    let before = descriptor::load(&dir.path().join("zoomed.txt")).unwrap();

    fractals()
        .arg("--load")
        .arg(dir.path().join("zoomed.txt"))
        .args(&["--zoom", "top-left"])
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success();
    let after = descriptor::load(&dir.path().join("zoomed.txt")).unwrap();

    assert_eq!((after.width(), after.height()), (before.width(), before.height()));
    assert_eq!(after.plane().step(), 0.05);
    assert_eq!(after.plane().x_max(), -0.5);
    assert_eq!(after.plane().y_min(), 0.0);
}

#[test]
fn requires_a_fractal() {
    fractals().assert().failure();
}

#[test]
fn rejects_an_unknown_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.txt");
    fs::write(&path, "Sierpinski\n100\n").unwrap();
    fractals()
        .arg("--load")
        .arg(&path)
        .arg("--output")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sierpinski"));
}

#[test]
fn rejects_an_inverted_rectangle() {
    let dir = tempfile::tempdir().unwrap();
    fractals()
        .args(&["--mandelbrot", "--x-min", "1", "--x-max", "-1"])
        .arg("--output")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid plane rectangle"));
}
