// src/output.rs
use crate::mc::kernel::BatchResult;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub fn write_batches_to_csv<P: AsRef<Path>>(filename: P, results: &[BatchResult]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "stream_id,hits,total,estimate")?;
    for (i, result) in results.iter().enumerate() {
        writeln!(
            file,
            "{},{},{},{}",
            i,
            result.hits,
            result.total,
            result.estimate()
        )?;
    }
    Ok(())
}

pub fn write_summary_to_csv<P: AsRef<Path>>(filename: P, summary_data: &[(&str, String)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}
