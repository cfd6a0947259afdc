use std::collections::HashMap;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExprStats {
    pub calls: u32,
    pub total: Duration,
}

impl ExprStats {
    pub fn average(&self) -> Duration {
        if self.calls == 0 {
            return Duration::ZERO;
        }
        self.total / self.calls
    }
}

/// Cumulative evaluation time per expression text.
#[derive(Debug, Default)]
pub struct Stats {
    by_text: HashMap<String, ExprStats>,
}

impl Stats {
    pub fn record(&mut self, text: &str, elapsed: Duration) {
        let entry = self.by_text.entry(text.to_string()).or_default();
        entry.calls += 1;
        entry.total += elapsed;
    }

    pub fn get(&self, text: &str) -> Option<&ExprStats> {
        self.by_text.get(text)
    }

    pub fn len(&self) -> usize {
        self.by_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_text.is_empty()
    }

    /// The `n` expressions with the largest total time.
    pub fn top(&self, n: usize) -> Vec<(String, ExprStats)> {
        let mut all: Vec<_> = self.by_text.iter()
            .map(|(text, stats)| (text.clone(), *stats))
            .collect();
        all.sort_by(|a, b| b.1.total.cmp(&a.1.total).then_with(|| a.0.cmp(&b.0)));
        all.truncate(n);
        all
    }
}

///////////////////////////////////////////////////////////////////////////////
