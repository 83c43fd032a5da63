use std::process::ExitCode;

use mknote_exif::internal::ExifRaw;
use mknote_exif::Exif;
use mknote_jpeg::Jpeg;
use tracing_subscriber::prelude::*;

const USAGE: &str = "Usage: mknote-dump [--raw] <file>";

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::builder().from_env_lossy())
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();

    let mut raw = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--raw" => raw = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            _ if path.is_none() => path = Some(arg),
            _ => {
                eprintln!("{USAGE}");
                return ExitCode::FAILURE;
            }
        }
    }

    let Some(path) = path else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    match run(&path, raw) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{path}: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str, raw: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(path)?;
    let exif_data = exif_data(data)?;

    if raw {
        let mut decoder = ExifRaw::new(exif_data);
        decoder.decode()?;
        println!("{}", decoder.debug_dump());
        return Ok(());
    }

    let exif = Exif::new(exif_data)?;

    println!("Make: {}", exif.make().unwrap_or_default());
    println!("Model: {}", exif.model().unwrap_or_default());

    let Some(kind) = exif.makernote_kind() else {
        println!("No supported makernote");
        return Ok(());
    };

    println!("\n{}", kind.name());
    for description in exif.makernote_descriptions() {
        println!(
            "{}: {}",
            description.name,
            description.description.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

/// Exif payload of a JPEG, or the data itself for TIFF-structured files
fn exif_data(data: Vec<u8>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if !Jpeg::is_filetype(&data) {
        tracing::debug!("Not a JPEG, reading data as Exif");
        return Ok(data);
    }

    let jpeg = Jpeg::new(&data)?;
    let exif = jpeg.exif_data().next().ok_or("JPEG contains no Exif data")?;

    Ok(exif.to_vec())
}
