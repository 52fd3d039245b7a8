//! Live stroke capture and scoring of one practice run.
//!
//! The host delivers stroke events serially: points while the pen is down,
//! then the end of the stroke. A `Session` turns those into live signatures,
//! scores them against the reference stroke that is due next, and reports
//! the accuracy once every stroke of the character has been drawn.

use log::{debug, trace};

use crate::error::Error;
use crate::geometry::{DirectionVector, Point, Polyline, Signature};
use crate::library::StrokeLibrary;
use crate::resample::fill_segment;
use crate::score::{Scorer, StrokeScore, Tally};
use crate::signature::summarize_live;

/// Buffer for the points of the stroke currently being drawn.
#[derive(Debug, Clone)]
pub struct LiveStroke {
    spacing: f64,
    points: Polyline,
}

impl LiveStroke {
    pub fn new(spacing: f64) -> Self {
        Self {
            spacing,
            points: Polyline::new(),
        }
    }

    /// Append an input point. Gaps wider than the spacing are filled by
    /// linear interpolation from the previous point.
    ///
    /// A point too far away from the previous one to be filled in is
    /// rejected and the buffer is left unchanged.
    pub fn push(&mut self, point: Point) -> Result<(), Error> {
        if let Some(&last) = self.points.last() {
            let mut filled = Polyline::new();
            fill_segment(last, point, self.spacing, &mut filled)?;
            self.points.extend(filled.into_iter().skip(1));
        }
        self.points.push(point);
        Ok(())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Signature with the same number of vectors as the reference.
    pub fn signature(&self, reference_len: usize) -> Signature {
        summarize_live(&self.points, reference_len)
    }
}

/// What happened when a stroke was submitted.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct StrokeOutcome {
    /// 0-based character index.
    pub character: usize,
    /// 1-based index of the stroke that was scored.
    pub stroke: usize,
    pub score: StrokeScore,
    /// Set when this was the last stroke of the character. The tally has
    /// been reset at that point.
    pub accuracy: Option<f64>,
}

/// One practice run over the characters of a library.
#[derive(Debug)]
pub struct Session<'a> {
    library: &'a StrokeLibrary,
    scorer: Scorer,
    tally: Tally,
    live: LiveStroke,
    character: usize,
    /// 0-based index of the next stroke to draw.
    stroke: usize,
}

impl<'a> Session<'a> {
    pub fn new(library: &'a StrokeLibrary) -> Self {
        let config = library.config();
        Self {
            library,
            scorer: Scorer::new(config.tolerance_degrees, config.wrap_angles),
            tally: Tally::new(),
            live: LiveStroke::new(config.live_spacing()),
            character: 0,
            stroke: 0,
        }
    }

    /// Switch to another character, starting a new attempt at its first
    /// stroke.
    pub fn set_character(&mut self, character: usize) -> Result<(), Error> {
        if character >= self.library.character_count() {
            return Err(Error::NoSuchCharacter(character));
        }
        debug!("Session: switching to character {}", character);
        self.character = character;
        self.stroke = 0;
        self.tally.reset();
        self.live.clear();
        Ok(())
    }

    pub fn character(&self) -> usize {
        self.character
    }

    /// 1-based index of the stroke that is due next.
    pub fn stroke(&self) -> usize {
        self.stroke + 1
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn live(&self) -> &LiveStroke {
        &self.live
    }

    /// Reference signature of the stroke that is due next.
    pub fn reference(&self) -> Option<&'a [DirectionVector]> {
        self.library.directions(self.character, self.stroke + 1)
    }

    pub fn extend_stroke(&mut self, point: Point) -> Result<(), Error> {
        trace!("Session: extend stroke with {:?}", point);
        self.live.push(point)
    }

    /// Drop the stroke being drawn without scoring it.
    pub fn cancel_stroke(&mut self) {
        self.live.clear();
    }

    /// Finish the stroke being drawn and score it against the reference.
    ///
    /// Returns `None` if the library holds no reference for the current
    /// position.
    pub fn end_stroke(&mut self) -> Option<StrokeOutcome> {
        let reference_len = self.reference()?.len();
        let signature = self.live.signature(reference_len);
        self.live.clear();
        self.submit_signature(&signature)
    }

    /// Score a completed live signature against the stroke that is due next
    /// and advance to the following stroke.
    pub fn submit_signature(&mut self, live: &[DirectionVector]) -> Option<StrokeOutcome> {
        let reference = self.reference()?;
        let score = self.scorer.score(reference, live, &mut self.tally);
        let stroke = self.stroke + 1;

        self.stroke += 1;
        let accuracy = if self.stroke >= self.library.stroke_count(self.character) {
            self.stroke = 0;
            let accuracy = self.tally.finish();
            debug!(
                "Session: character {} finished with accuracy {}",
                self.character, accuracy
            );
            Some(accuracy)
        } else {
            None
        };

        Some(StrokeOutcome {
            character: self.character,
            stroke,
            score,
            accuracy,
        })
    }
}
