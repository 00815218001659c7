//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use dokumon_core::PixelBuffer;
use dokumon_io::ImageFormat;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything unrecognized is `Compare`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, current index, mode, and success status. Every
/// check increments the index so failures can be located in the log.
pub struct RegParams {
    /// Name of the test (e.g., "convolve")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        // Ensure directories exist
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

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

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record_failure(&mut self, msg: String) {
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
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Compare two buffers for exact equality
    pub fn compare_pix(&mut self, pix1: &PixelBuffer, pix2: &PixelBuffer) -> bool {
        self.compare_pix_tolerance(pix1, pix2, 0)
    }

    /// Compare two buffers allowing each channel to differ by `tolerance`
    pub fn compare_pix_tolerance(
        &mut self,
        pix1: &PixelBuffer,
        pix2: &PixelBuffer,
        tolerance: u8,
    ) -> bool {
        self.index += 1;

        match pix1.count_pixel_diffs(pix2, tolerance) {
            Err(e) => {
                let msg = format!(
                    "Failure in {}_reg: pix comparison for index {} - {}",
                    self.test_name, self.index, e
                );
                self.record_failure(msg);
                false
            }
            Ok(diff) if diff.n_diff > 0 => {
                let msg = format!(
                    "Failure in {}_reg: pix comparison for index {} - {} pixels differ, max channel diff {} (tolerance {})",
                    self.test_name, self.index, diff.n_diff, diff.max_diff, tolerance
                );
                self.record_failure(msg);
                false
            }
            Ok(_) => true,
        }
    }

    /// Write a buffer to the regout directory and check it against its
    /// golden file
    ///
    /// In compare mode a missing golden file is reported but does not fail
    /// the test; run once with `REGTEST_MODE=generate` to create it.
    pub fn write_pix_and_check(&mut self, pix: &PixelBuffer, format: ImageFormat) -> TestResult<()> {
        self.index += 1;

        let ext = format.extension();
        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        );

        dokumon_io::write_image(pix, &local_path, format).map_err(|e| TestError::ImageWrite {
            path: local_path.clone(),
            message: e.to_string(),
        })?;

        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    eprintln!(
                        "{}_reg index {}: no golden file at {}, skipping",
                        self.test_name, self.index, golden_path
                    );
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                if local_data != golden_data && !self.compare_image_files(local_path, &golden_path)? {
                    let msg = format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    );
                    self.record_failure(msg);
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Compare two image files pixel-by-pixel
    fn compare_image_files(&self, path1: &str, path2: &str) -> TestResult<bool> {
        let load = |path: &str| {
            dokumon_io::read_image(path).map_err(|e| TestError::ImageLoad {
                path: path.to_string(),
                message: e.to_string(),
            })
        };
        let pix1 = load(path1)?;
        let pix2 = load(path2)?;
        Ok(pix1 == pix2)
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

    /// Check if all tests have passed so far
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
    use dokumon_core::color;

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse("generate"), RegTestMode::Generate);
        assert_eq!(RegTestMode::parse(" Display "), RegTestMode::Display);
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("bogus"), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params_values");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 3);
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_pix_tolerance() {
        let a = PixelBuffer::new_filled(2, 2, color::compose_rgb(10, 10, 10)).unwrap();
        let b = PixelBuffer::new_filled(2, 2, color::compose_rgb(11, 10, 10)).unwrap();
        let c = PixelBuffer::new(3, 2).unwrap();

        let mut rp = RegParams::new("params_pix");
        assert!(rp.compare_pix(&a, &a));
        assert!(rp.compare_pix_tolerance(&a, &b, 1));
        assert!(rp.is_success());
        assert!(!rp.compare_pix(&a, &b));
        assert!(!rp.compare_pix(&a, &c));
        assert_eq!(rp.failures().len(), 2);
        assert!(!rp.cleanup());
    }
}
