//! Reference stroke data and stroke scoring for handwriting practice of
//! logographic characters.
//!
//! A character document lists characters as groups of stroke paths. Each
//! path is flattened into a polyline, resampled to an even point spacing and
//! summarized into a short sequence of direction vectors (its signature).
//! Strokes drawn by the user go through the same resampling and
//! summarization and are then compared with the reference signature
//! direction by direction within an angular tolerance.
//!
//! Only the path commands `M`, `c` and `C` are understood. Flattening of the
//! cubic Bézier segments is done by forward differencing.
//!
//! You can optionally get serde 1 support by enabling the `serde` feature.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod document;
mod error;
mod geometry;
mod library;
mod path;
mod resample;
mod score;
mod session;
mod signature;
mod tessellate;

use log::trace;

pub use crate::config::{Config, RelativeMode};
pub use crate::document::{decode_document, Character, RawStroke};
pub use crate::error::Error;
pub use crate::geometry::{DirectionVector, Point, Polyline, Signature};
pub use crate::library::{DecodedCharacter, DecodedStroke, StrokeLibrary};
pub use crate::path::parse_path;
pub use crate::resample::{resample, MAX_SEGMENT_POINTS};
pub use crate::score::{Scorer, StrokeScore, Tally};
pub use crate::session::{LiveStroke, Session, StrokeOutcome};
pub use crate::signature::{summarize_live, summarize_reference};
pub use crate::tessellate::tessellate_cubic;

/// Decode a character document and derive the reference data of every
/// stroke in it.
pub fn decode(document: &str, config: &Config) -> Result<StrokeLibrary, Error> {
    trace!("decode");
    config.validate()?;
    let characters = decode_document(document)?;
    trace!("decode: Found {} characters", characters.len());
    StrokeLibrary::build(&characters, *config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_spacing(subdivisions: usize) -> Config {
        Config {
            subdivisions,
            spacing: 100.0,
            ..Config::default()
        }
    }

    #[test]
    fn test_end_to_end_tessellation() {
        let _ = env_logger::try_init();
        let input = r#"<kanji><g name="one"><path d="M0,0c10,0,20,0,30,0"/></g></kanji>"#;
        let characters = decode_document(input).unwrap();
        let outline = parse_path(
            &characters[0].strokes[0].path,
            1,
            RelativeMode::CurrentPoint,
        )
        .unwrap();
        assert_eq!(outline.len(), 3);
        assert_eq!(outline[0], Point::new(0.0, 0.0));
        assert!((outline[1].x - 15.0).abs() < 1e-9);
        assert!(outline[1].y.abs() < 1e-9);
        assert_eq!(outline[2], Point::new(30.0, 0.0));

        // A spacing wider than the stroke keeps the tessellated points.
        let library = decode(input, &wide_spacing(1)).unwrap();
        assert_eq!(library.points(0, 1).unwrap(), &outline);
    }

    #[test]
    fn test_kanjivg_style_paths() {
        let _ = env_logger::try_init();
        let input = r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <kanji>
                <g name="jū ten">
                    <path d="M18.5,52.02c2.6,0.61,7.04,0.71,9.63,0.53c18.37-1.3,40.62-3.05,58.76-3.1c4.34-0.01,6.94,0.29,9.11,0.59"/>
                    <path d="M51.75,13.75c1.06,1.06,1.83,3,1.83,4.5c0,23.88,0,58.88,0,74.75"/>
                </g>
            </kanji>
        "#;
        let library = decode(input, &Config::default()).unwrap();
        assert_eq!(library.character_count(), 1);
        assert_eq!(library.stroke_count(0), 2);
        assert_eq!(library.character(0).unwrap().short_name(), "jū");

        // Horizontal stroke drawn left to right.
        let across = library.points(0, 1).unwrap();
        assert_eq!(across[0], Point::new(18.5, 52.02));
        let end = across.last().unwrap();
        assert!((end.x - 96.0).abs() < 1e-6);
        assert!((end.y - 50.04).abs() < 1e-6);

        // Vertical stroke drawn top to bottom points down after the y flip.
        let down = library.directions(0, 2).unwrap();
        let middle = down[down.len() / 2];
        assert!((middle.angle_degrees() + 90.0).abs() < 1.0);
    }

    #[test]
    fn test_accuracy_scenarios() {
        let scorer = Scorer::new(25.0, false);
        let reference = [DirectionVector::new(10.0, 0.0)];

        let mut tally = Tally::new();
        scorer.score(&reference, &[DirectionVector::new(9.0, 1.0)], &mut tally);
        assert_eq!(tally, Tally { total: 1, valid: 1 });
        assert_eq!(tally.finish(), 1.0);

        scorer.score(&reference, &[DirectionVector::new(0.0, 10.0)], &mut tally);
        assert_eq!(tally, Tally { total: 1, valid: 0 });
        assert_eq!(tally.finish(), 0.0);
    }

    #[test]
    fn test_empty_document() {
        let err = decode("", &Config::default()).unwrap_err();
        assert!(matches!(err, Error::EmptySource));
        assert!(err.is_decode());
    }

    #[test]
    fn test_missing_d_attribute() {
        let input = r#"
            <kanji>
                <g name="two">
                    <path d="M0,0c10,0,20,0,30,0"/>
                    <path id="second"/>
                </g>
            </kanji>
        "#;
        assert!(matches!(
            decode(input, &Config::default()),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected_first() {
        let config = Config {
            group_size: 0,
            ..Config::default()
        };
        assert!(matches!(decode("", &config), Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_command_keeps_stroke() {
        let _ = env_logger::try_init();
        let input = r#"<kanji><g name="s"><path d="M0,0c10,0,20,0,30,0s5,5,10,10"/></g></kanji>"#;
        let library = decode(input, &wide_spacing(0)).unwrap();
        assert_eq!(
            library.points(0, 1).unwrap(),
            &vec![Point::new(0.0, 0.0), Point::new(30.0, 0.0)]
        );
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let far = r#"<kanji><g name="x"><path d="M0,0C0,0,0,0,1e30,0"/></g></kanji>"#;
        assert!(matches!(
            decode(far, &Config::default()),
            Err(Error::SegmentTooLong { .. })
        ));
        let overflow = r#"<kanji><g name="x"><path d="M0,0C0,0,0,0,1e400,0"/></g></kanji>"#;
        assert!(matches!(
            decode(overflow, &Config::default()),
            Err(Error::PathParse(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let input = r#"<kanji><g name="one"><path d="M0,0c10,0,20,0,30,0"/></g></kanji>"#;
        let library = decode(input, &wide_spacing(0)).unwrap();
        let character = library.character(0).unwrap();
        let json = serde_json::to_string(character).unwrap();
        let back: DecodedCharacter = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, character);

        let tally = Tally { total: 3, valid: 2 };
        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"total":3,"valid":2}"#);
    }
}
