use std::io::{self, Write};
use tessera_core::{MoveOutcome, Snapshot};

/// How snapshots are written to the output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Renderer {
    Text,
    /// One JSON object per line.
    Json,
}

impl Renderer {
    pub fn render(
        self,
        out: &mut impl Write,
        snapshot: &Snapshot,
        outcome: Option<MoveOutcome>,
    ) -> io::Result<()> {
        match self {
            Self::Text => render_text(out, snapshot, outcome),
            Self::Json => render_json(out, snapshot, outcome),
        }
    }

    /// Free-form message, suppressed in JSON mode so the stream stays machine readable.
    pub fn note(self, out: &mut impl Write, message: &str) -> io::Result<()> {
        match self {
            Self::Text => writeln!(out, "{}", message),
            Self::Json => Ok(()),
        }
    }
}

fn render_text(out: &mut impl Write, snapshot: &Snapshot, outcome: Option<MoveOutcome>) -> io::Result<()> {
    match outcome {
        Some(MoveOutcome::GameOver { final_score }) => {
            writeln!(out, "No moves left, final score: {}", final_score)?;
        }
        Some(MoveOutcome::NoChange) => writeln!(out, "Nothing moved")?,
        Some(MoveOutcome::Ignored) => writeln!(out, "Not a swipe")?,
        Some(MoveOutcome::Moved) | None => {}
    }

    let board = snapshot
        .to_board()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    write!(out, "{}", board)?;
    writeln!(
        out,
        "score: {}  moves: {}  state: {:?}",
        snapshot.score, snapshot.move_count, snapshot.state
    )?;
    out.flush()
}

#[derive(serde::Serialize)]
struct JsonFrame<'a> {
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    outcome: Option<MoveOutcome>,
}

fn render_json(out: &mut impl Write, snapshot: &Snapshot, outcome: Option<MoveOutcome>) -> io::Result<()> {
    serde_json::to_writer(&mut *out, &JsonFrame { snapshot, outcome })?;
    writeln!(out)?;
    out.flush()
}
