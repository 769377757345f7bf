//! Output sinks: the score display and the frame renderer.
//!
//! The simulation only produces snapshots. Whatever draws them, or shows the
//! score, sits behind these traits.

use std::io::Write;

use saucer_core::state::FrameSnapshot;

/// Something that shows the current score.
pub trait ScoreDisplay {
    fn show_score(&mut self, score: u32);
}

/// Something that draws one frame.
pub trait FrameRenderer {
    fn render(&mut self, snapshot: &FrameSnapshot);
}

impl<T: ScoreDisplay + ?Sized> ScoreDisplay for Box<T> {
    fn show_score(&mut self, score: u32) {
        (**self).show_score(score);
    }
}

impl<T: FrameRenderer + ?Sized> FrameRenderer for Box<T> {
    fn render(&mut self, snapshot: &FrameSnapshot) {
        (**self).render(snapshot);
    }
}

/// Pushes the score to a display only when it changes.
pub struct ScoreSink<D: ScoreDisplay> {
    display: D,
    last: Option<u32>,
}

impl<D: ScoreDisplay> ScoreSink<D> {
    pub fn new(display: D) -> Self {
        Self {
            display,
            last: None,
        }
    }

    /// Forward `score` if it differs from the last value shown.
    pub fn push(&mut self, score: u32) {
        if self.last != Some(score) {
            self.display.show_score(score);
            self.last = Some(score);
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

/// Logs the score.
#[derive(Debug, Default)]
pub struct LogScoreDisplay;

impl ScoreDisplay for LogScoreDisplay {
    fn show_score(&mut self, score: u32) {
        log::info!("Score: {score}");
    }
}

/// Writes each snapshot as one JSON line.
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameRenderer for JsonLinesRenderer<W> {
    fn render(&mut self, snapshot: &FrameSnapshot) {
        if self.failed {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, snapshot)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(e) = result {
            // Usually a closed pipe; stop writing rather than spam the log.
            log::error!("Snapshot output failed: {e}");
            self.failed = true;
        }
    }
}

/// Logs a one-line frame summary once per `interval` ticks.
pub struct LogRenderer {
    interval: u64,
}

impl LogRenderer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl FrameRenderer for LogRenderer {
    fn render(&mut self, snapshot: &FrameSnapshot) {
        if snapshot.time.tick % self.interval != 0 {
            return;
        }
        let craft = &snapshot.craft.position;
        log::debug!(
            "t={:.1}s craft=({:.1}, {:.1}, {:.1}) cows={} rising={}",
            snapshot.time.elapsed_secs,
            craft.x,
            craft.y,
            craft.z,
            snapshot.cows.len(),
            snapshot.abducting_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        shown: Vec<u32>,
    }

    impl ScoreDisplay for Recorder {
        fn show_score(&mut self, score: u32) {
            self.shown.push(score);
        }
    }

    #[test]
    fn test_score_pushed_only_on_change() {
        let mut sink = ScoreSink::new(Recorder::default());
        for score in [0, 0, 0, 1, 1, 2, 2, 2, 3] {
            sink.push(score);
        }
        assert_eq!(sink.display().shown, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_json_lines_one_snapshot_per_line() {
        let mut renderer = JsonLinesRenderer::new(Vec::new());
        let mut snapshot = FrameSnapshot::default();
        renderer.render(&snapshot);
        snapshot.score = 4;
        renderer.render(&snapshot);

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: FrameSnapshot = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.score, 4);
    }
}
