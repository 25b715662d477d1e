//! Output Modes
//!
//! The six document types the assistant can produce, plus the selection
//! wrapper that lets arbitrary user text fall through to the generic template.

/// Requested output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    PositionPaper,
    ResolutionDrafting,
    DebateSpeech,
    CrisisResponse,
    NegotiationStrategy,
    ResearchBrief,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::PositionPaper,
        Mode::ResolutionDrafting,
        Mode::DebateSpeech,
        Mode::CrisisResponse,
        Mode::NegotiationStrategy,
        Mode::ResearchBrief,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Mode::PositionPaper => "Position Paper",
            Mode::ResolutionDrafting => "Resolution Drafting",
            Mode::DebateSpeech => "Debate Speech",
            Mode::CrisisResponse => "Crisis Response",
            Mode::NegotiationStrategy => "Negotiation Strategy",
            Mode::ResearchBrief => "Research Brief",
        }
    }

    /// Command-line spelling
    pub fn slug(&self) -> &'static str {
        match self {
            Mode::PositionPaper => "position-paper",
            Mode::ResolutionDrafting => "resolution-drafting",
            Mode::DebateSpeech => "debate-speech",
            Mode::CrisisResponse => "crisis-response",
            Mode::NegotiationStrategy => "negotiation-strategy",
            Mode::ResearchBrief => "research-brief",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    /// Accepts labels and slugs, ignoring case and `-`/`_`/space separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Mode::ALL
            .into_iter()
            .find(|mode| normalize_key(mode.label()) == key)
            .ok_or_else(|| {
                format!(
                    "Unknown mode: {}. Valid values: {}",
                    s,
                    Mode::ALL.map(|m| m.slug()).join(", ")
                )
            })
    }
}

fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A mode as received from the caller. Unrecognized text is kept, not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeSelection {
    Known(Mode),
    Unrecognized(String),
}

impl ModeSelection {
    /// Total parse: anything that is not a known mode becomes `Unrecognized`
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<Mode>() {
            Ok(mode) => ModeSelection::Known(mode),
            Err(_) => ModeSelection::Unrecognized(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ModeSelection::Known(mode) => mode.label(),
            ModeSelection::Unrecognized(raw) => raw,
        }
    }
}

impl From<Mode> for ModeSelection {
    fn from(mode: Mode) -> Self {
        ModeSelection::Known(mode)
    }
}
