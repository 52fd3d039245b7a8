#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Source document is empty")]
    EmptySource,
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
    #[error("Path parse error: {0}")]
    PathParse(String),
    #[error("Segment of length {distance} needs more than {limit} points at spacing {spacing}")]
    SegmentTooLong {
        distance: f64,
        spacing: f64,
        limit: usize,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("No character with index {0}")]
    NoSuchCharacter(usize),
}

impl Error {
    /// Whether this error was caused by the input data (the source document
    /// or drawn points) rather than by the configuration or a lookup.
    pub fn is_decode(&self) -> bool {
        !matches!(self, Error::Config(_) | Error::NoSuchCharacter(_))
    }
}
