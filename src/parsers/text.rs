use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::trace;

use crate::constants::{TEXT_CONTROL_CODES, TEXT_SAMPLE_SIZE};

/// Whether a byte belongs to the printable-ish set used by the heuristic
fn is_text_byte(byte: u8) -> bool {
    byte >= 0x20 || TEXT_CONTROL_CODES.contains(&byte)
}

/// Fraction of printable-ish bytes in a sample, `None` for an empty sample
pub fn text_fraction(sample: &[u8]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    let text = sample.iter().filter(|&&b| is_text_byte(b)).count();
    Some(text as f64 / sample.len() as f64)
}

/// Classify an in-memory sample against a threshold
pub fn is_text_sample(sample: &[u8], threshold: f64) -> bool {
    text_fraction(sample).map_or(false, |fraction| fraction >= threshold)
}

/// Decide whether a file is parseable as text.
///
/// Reads at most the first [`TEXT_SAMPLE_SIZE`] bytes. Empty or unreadable
/// files are never text.
pub fn is_text_file(path: &Path, threshold: f64) -> bool {
    let mut sample = Vec::with_capacity(TEXT_SAMPLE_SIZE);
    let read = File::open(path).and_then(|file| {
        file.take(TEXT_SAMPLE_SIZE as u64).read_to_end(&mut sample)
    });

    match read {
        Ok(_) => is_text_sample(&sample, threshold),
        Err(e) => {
            trace!("Treating unreadable {} as binary: {}", path.display(), e);
            false
        }
    }
}
