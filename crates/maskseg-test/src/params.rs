//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use maskseg_core::{BinaryMask, RgbImage};
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Run every comparison (default)
    #[default]
    Compare,
    /// Compare and also write PNG previews
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running check index, the mode and every
/// recorded failure.
pub struct RegParams {
    /// Name of the test (e.g., "otsu")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is read from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        if mode == RegTestMode::Display {
            let _ = fs::create_dir_all(regout_dir());
        }

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two masks for exact equality
    pub fn compare_masks(&mut self, expected: &BinaryMask, actual: &BinaryMask) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() {
            self.fail(format!(
                "Failure in {}_reg: mask comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.dimensions(),
                actual.dimensions()
            ));
            return false;
        }

        let w = expected.width() as usize;
        let first_diff = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);
        if let Some(i) = first_diff {
            self.fail(format!(
                "Failure in {}_reg: mask comparison for index {} - pixel mismatch at ({}, {})",
                self.test_name,
                self.index,
                i % w,
                i / w
            ));
            return false;
        }

        true
    }

    /// Compare two color images for exact equality
    pub fn compare_rgb(&mut self, expected: &RgbImage, actual: &RgbImage) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() {
            self.fail(format!(
                "Failure in {}_reg: rgb comparison for index {} - dimension mismatch",
                self.test_name, self.index
            ));
            return false;
        }

        for y in 0..expected.height() {
            for x in 0..expected.width() {
                if expected.get_rgb(x, y) != actual.get_rgb(x, y) {
                    self.fail(format!(
                        "Failure in {}_reg: rgb comparison for index {} - pixel mismatch at ({}, {})",
                        self.test_name, self.index, x, y
                    ));
                    return false;
                }
            }
        }

        true
    }

    /// Write a mask preview in display mode.
    ///
    /// Does nothing in compare mode or for an empty mask.
    pub fn write_mask(&mut self, mask: &BinaryMask) -> TestResult<()> {
        self.index += 1;
        if !self.display() || mask.is_empty() {
            return Ok(());
        }
        let path = self.preview_path();
        image::save_buffer(
            &path,
            mask.data(),
            mask.width(),
            mask.height(),
            image::ColorType::L8,
        )
        .map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    /// Write a color image preview in display mode.
    pub fn write_rgb(&mut self, img: &RgbImage) -> TestResult<()> {
        self.index += 1;
        if !self.display() || img.is_empty() {
            return Ok(());
        }
        let path = self.preview_path();
        image::save_buffer(
            &path,
            img.data(),
            img.width(),
            img.height(),
            image::ColorType::Rgb8,
        )
        .map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    fn preview_path(&self) -> String {
        format!("{}/{}.{:02}.png", regout_dir(), self.test_name, self.index)
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("harness");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 2);
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_masks_reports_position() {
        let a = BinaryMask::from_fn(4, 4, |x, _| x < 2).unwrap();
        let b = BinaryMask::from_fn(4, 4, |x, y| x < 2 || (x, y) == (3, 2)).unwrap();
        let mut rp = RegParams::new("harness_masks");
        assert!(rp.compare_masks(&a, &a.clone()));
        assert!(!rp.compare_masks(&a, &b));
        assert!(rp.failures()[0].contains("(3, 2)"));
    }
}
