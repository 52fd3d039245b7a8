use std::path::Path;

use kanjistroke::{Config, StrokeLibrary};
use serde_json::{json, Value};

pub const HELP: &str = "signatures

USAGE:
    signatures [OPTIONS] [INPUT]

OPTIONS:
    -h, --help\t\tPrint this message
    --radius <R>\t\tRadius of a drawn point (default 0.5)
    --group-size <N>\tPoints per direction vector (default 5)
    --subdivisions <N>\tInterior points per curve segment (default 2)

INPUT is a character document, either a file path or the document itself.
Without INPUT the document is read from stdin.

Prints a JSON array with one object per character, holding the reference
direction vectors of each stroke.";

fn parse_option<T: std::str::FromStr>(
    name: &str,
    value: Option<String>,
) -> Result<T, Box<dyn std::error::Error>> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("Option {} expects a number", name).into())
}

fn to_json(library: &StrokeLibrary) -> Result<String, serde_json::Error> {
    let characters: Vec<Value> = library
        .characters()
        .iter()
        .map(|character| {
            let strokes: Vec<Vec<[f64; 2]>> = character
                .strokes
                .iter()
                .map(|stroke| stroke.directions.iter().map(|d| [d.x, d.y]).collect())
                .collect();
            json!({
                "name": character.name,
                "strokes": strokes,
            })
        })
        .collect();
    serde_json::to_string_pretty(&characters)
}

fn main() {
    fn inner() -> Result<(), Box<dyn std::error::Error>> {
        // Logging
        env_logger::init();

        let mut input = None;
        let mut radius = 0.5;
        let mut config = Config::default();

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => {
                    println!("{}", HELP);
                    return Ok(());
                }
                "--radius" => radius = parse_option("--radius", args.next())?,
                "--group-size" => config.group_size = parse_option("--group-size", args.next())?,
                "--subdivisions" => {
                    config.subdivisions = parse_option("--subdivisions", args.next())?;
                }
                _ => input = Some(arg),
            }
        }
        config.spacing = Config::from_point_radius(radius).spacing;

        let mut input = if let Some(input) = input {
            input
        } else {
            let mut buffer = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
            buffer
        };

        if Path::new(&input).exists() {
            input = std::fs::read_to_string(&input)?;
        }

        let library = kanjistroke::decode(&input, &config)?;
        println!("{}", to_json(&library)?);

        Ok(())
    }

    if let Err(e) = inner() {
        eprintln!("{}", e);
        std::process::exit(2);
    }
}
