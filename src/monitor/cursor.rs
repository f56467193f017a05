use std::collections::VecDeque;

/// What a call to [`LogCursor::observe`] did to the displayed log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// The response carried lines past the cursor; they are in server order.
    NewLines(Vec<String>),
    /// The response did not advance the cursor. Nothing was rendered.
    NoNewLines,
}

/// Last consumed log line index for the active job, plus the log as shown
/// to the user (most recent line first).
#[derive(Debug, Clone, Default)]
pub struct LogCursor {
    position: u64,
    displayed: VecDeque<String>,
}

impl LogCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    /// Displayed log, newest line first.
    pub fn displayed(&self) -> impl Iterator<Item = &str> {
        self.displayed.iter().map(String::as_str)
    }

    pub fn displayed_len(&self) -> usize {
        self.displayed.len()
    }

    /// True once any response has advanced the cursor.
    pub fn has_output(&self) -> bool {
        self.position > 0
    }

    /// Feed the `linea` value and `log` lines of a status record.
    ///
    /// Lines are only taken when `linea` moves past the cursor, which makes
    /// duplicate or empty polls a no-op.
    pub fn observe(&mut self, linea: u64, lines: &[String]) -> Observation {
        if linea <= self.position {
            return Observation::NoNewLines;
        }
        for line in lines {
            self.displayed.push_front(line.clone());
        }
        self.position = linea;
        Observation::NewLines(lines.to_vec())
    }

    /// Forget everything. Only used when monitoring switches to another job.
    pub fn reset(&mut self) {
        self.position = 0;
        self.displayed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_lines_are_shown_newest_first() {
        let mut cursor = LogCursor::new();
        let obs = cursor.observe(3, &lines(&["a", "b", "c"]));
        assert_eq!(obs, Observation::NewLines(lines(&["a", "b", "c"])));
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.displayed().collect::<Vec<_>>(), vec!["c", "b", "a"]);
    }

    #[test]
    fn repeated_linea_changes_nothing() {
        let mut cursor = LogCursor::new();
        cursor.observe(3, &lines(&["a", "b", "c"]));
        assert_eq!(cursor.observe(3, &[]), Observation::NoNewLines);
        assert_eq!(cursor.observe(3, &lines(&["c"])), Observation::NoNewLines);
        assert_eq!(cursor.observe(2, &lines(&["x"])), Observation::NoNewLines);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.displayed_len(), 3);
    }

    #[test]
    fn log_grows_with_every_advance() {
        let mut cursor = LogCursor::new();
        let batches: [(u64, &[&str]); 5] = [
            (2, &["l1", "l2"]),
            (2, &[]),
            (3, &["l3"]),
            (3, &[]),
            (6, &["l4", "l5", "l6"]),
        ];
        let mut last_len = 0;
        for (linea, batch) in batches {
            cursor.observe(linea, &lines(batch));
            assert!(cursor.displayed_len() >= last_len);
            last_len = cursor.displayed_len();
        }
        assert_eq!(last_len, 6);
        assert_eq!(
            cursor.displayed().collect::<Vec<_>>(),
            vec!["l6", "l5", "l4", "l3", "l2", "l1"]
        );
    }

    #[test]
    fn zero_linea_keeps_output_hidden() {
        let mut cursor = LogCursor::new();
        assert_eq!(cursor.observe(0, &[]), Observation::NoNewLines);
        assert!(!cursor.has_output());
    }

    #[test]
    fn reset_clears_position_and_log() {
        let mut cursor = LogCursor::new();
        cursor.observe(4, &lines(&["a"]));
        cursor.reset();
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.displayed_len(), 0);
        assert!(!cursor.has_output());
    }
}
