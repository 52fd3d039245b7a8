use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::document::Character;
use crate::error::Error;
use crate::geometry::{DirectionVector, Polyline, Signature};
use crate::path::parse_path;
use crate::resample::resample;
use crate::signature::summarize_reference;

/// A stroke after tessellation, resampling and summarization.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodedStroke {
    /// 1-based position of the stroke within its character.
    pub index: usize,
    pub points: Polyline,
    pub directions: Signature,
}

#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodedCharacter {
    pub name: String,
    pub strokes: Vec<DecodedStroke>,
}

impl DecodedCharacter {
    /// Run every stroke of `character` through the reference pipeline.
    pub fn from_character(character: &Character, config: &Config) -> Result<Self, Error> {
        trace!("DecodedCharacter::from_character: {:?}", character.name);
        let strokes = character
            .strokes
            .iter()
            .map(|raw| {
                let outline = parse_path(&raw.path, config.subdivisions, config.relative_mode)?;
                let points = resample(&outline, config.spacing)?;
                let directions = summarize_reference(&points, config.group_size);
                debug!(
                    "Stroke {} of {:?}: {} points, {} directions",
                    raw.index,
                    character.name,
                    points.len(),
                    directions.len()
                );
                Ok(DecodedStroke {
                    index: raw.index,
                    points,
                    directions,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self {
            name: character.name.clone(),
            strokes,
        })
    }

    /// First word of the name, used as the key for labels and audio clips.
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Look up a stroke by its 1-based index.
    pub fn stroke(&self, index: usize) -> Option<&DecodedStroke> {
        index.checked_sub(1).and_then(|i| self.strokes.get(i))
    }
}

/// All decoded characters of one document, together with the configuration
/// they were derived with. Read-only once built.
#[derive(Debug, Clone)]
pub struct StrokeLibrary {
    config: Config,
    characters: Vec<DecodedCharacter>,
}

impl StrokeLibrary {
    pub fn from_characters(characters: &[Character], config: Config) -> Result<Self, Error> {
        config.validate()?;
        Self::build(characters, config)
    }

    /// Build the library with a configuration that was already validated.
    pub(crate) fn build(characters: &[Character], config: Config) -> Result<Self, Error> {
        let characters = characters
            .iter()
            .map(|c| DecodedCharacter::from_character(c, &config))
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self { config, characters })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn characters(&self) -> &[DecodedCharacter] {
        &self.characters
    }

    pub fn character(&self, character: usize) -> Option<&DecodedCharacter> {
        self.characters.get(character)
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Number of strokes of the character at `character` (0-based), or 0 if
    /// there is no such character.
    pub fn stroke_count(&self, character: usize) -> usize {
        self.character(character).map_or(0, |c| c.strokes.len())
    }

    pub fn name(&self, character: usize) -> Option<&str> {
        self.character(character).map(|c| c.name.as_str())
    }

    /// Reference signature of a stroke. `stroke` is 1-based.
    pub fn directions(&self, character: usize, stroke: usize) -> Option<&[DirectionVector]> {
        self.character(character)
            .and_then(|c| c.stroke(stroke))
            .map(|s| s.directions.as_slice())
    }

    /// Resampled reference polyline of a stroke. `stroke` is 1-based.
    pub fn points(&self, character: usize, stroke: usize) -> Option<&Polyline> {
        self.character(character)
            .and_then(|c| c.stroke(stroke))
            .map(|s| &s.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::document::decode_document;
    use crate::geometry::Point;

    const SOURCE: &str = r#"
        <kanji>
            <g name="ichi one">
                <path d="M10,50c10,0,70,0,80,0"/>
            </g>
            <g name="ni two">
                <path d="M20,30C30,30,60,30,70,30"/>
                <path d="M10,70c10,0,70,0,80,0"/>
            </g>
        </kanji>
    "#;

    fn library(config: Config) -> StrokeLibrary {
        let characters = decode_document(SOURCE).unwrap();
        StrokeLibrary::from_characters(&characters, config).unwrap()
    }

    #[test]
    fn test_query_surface() {
        let lib = library(Config::default());
        assert_eq!(lib.character_count(), 2);
        assert_eq!(lib.stroke_count(0), 1);
        assert_eq!(lib.stroke_count(1), 2);
        assert_eq!(lib.stroke_count(2), 0);
        assert_eq!(lib.name(1), Some("ni two"));
        assert_eq!(lib.character(1).unwrap().short_name(), "ni");
        assert!(lib.directions(0, 1).is_some());
        assert!(lib.directions(0, 0).is_none());
        assert!(lib.directions(0, 2).is_none());
        assert!(lib.directions(5, 1).is_none());
    }

    #[test]
    fn test_horizontal_stroke() {
        let lib = library(Config::default());
        let points = lib.points(0, 1).unwrap();
        assert_eq!(points.first(), Some(&Point::new(10.0, 50.0)));
        assert_eq!(points.last(), Some(&Point::new(90.0, 50.0)));
        for pair in points.windows(2) {
            assert!(pair[0].distance(pair[1]) < 2.0);
        }

        let directions = lib.directions(0, 1).unwrap();
        assert_eq!(directions.len(), points.len().div_ceil(5));
        for d in &directions[..directions.len() - 1] {
            assert!(d.x > 0.0);
            assert!(d.y.abs() < 1e-9);
        }
    }

    #[test]
    fn test_indices_are_dense() {
        let lib = library(Config::default());
        let indices: Vec<usize> = lib.characters()[1].strokes.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn test_invalid_config() {
        let characters = decode_document(SOURCE).unwrap();
        let config = Config {
            spacing: -1.0,
            ..Config::default()
        };
        let err = StrokeLibrary::from_characters(&characters, config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(!err.is_decode());
    }

    #[test]
    fn test_bad_path_fails() {
        let source = r#"<kanji><g name="x"><path d="M1"/></g></kanji>"#;
        let characters = decode_document(source).unwrap();
        let result = StrokeLibrary::from_characters(&characters, Config::default());
        assert!(matches!(result, Err(Error::PathParse(_))));
    }

    #[test]
    fn test_far_away_point_fails() {
        let source = r#"<kanji><g name="x"><path d="M0,0C0,0,0,0,1e30,0"/></g></kanji>"#;
        let characters = decode_document(source).unwrap();
        let err = StrokeLibrary::from_characters(&characters, Config::default()).unwrap_err();
        assert!(matches!(err, Error::SegmentTooLong { .. }));
        assert!(err.is_decode());
    }
}
