use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Pending,
}

/// Progress indicator for a wizard: numbered markers joined by connectors.
///
/// Purely a view of `current` against the step titles; jump requests are only
/// produced when the owning wizard allows direct jumps.
#[derive(Debug, Clone)]
pub struct StepNavigator {
    titles: Vec<&'static str>,
    current: usize,
    allow_jump: bool,
}

impl StepNavigator {
    pub fn new(titles: Vec<&'static str>, current: usize, allow_jump: bool) -> Self {
        Self {
            titles,
            current,
            allow_jump,
        }
    }

    pub fn state(&self, index: usize) -> StepState {
        match index.cmp(&self.current) {
            std::cmp::Ordering::Less => StepState::Completed,
            std::cmp::Ordering::Equal => StepState::Active,
            std::cmp::Ordering::Greater => StepState::Pending,
        }
    }

    pub fn states(&self) -> Vec<StepState> {
        (0..self.titles.len()).map(|index| self.state(index)).collect()
    }

    /// Connector `n` joins step `n` and `n + 1`; it is filled once the wizard
    /// has moved past step `n`.
    pub fn connectors(&self) -> Vec<bool> {
        (0..self.titles.len().saturating_sub(1))
            .map(|index| self.current > index)
            .collect()
    }

    /// Translates a click on marker `index` into a jump request.
    pub fn request_jump(&self, index: usize) -> Option<usize> {
        (self.allow_jump && index < self.titles.len()).then_some(index)
    }

    pub fn header(&self) -> String {
        let title = self.titles.get(self.current).copied().unwrap_or_default();
        format!("Step {} of {} – {}", self.current + 1, self.titles.len(), title)
    }

    /// Plain-text rendering, stable for snapshots and screen readers.
    pub fn render(&self) -> String {
        let connectors = self.connectors();
        let mut out = String::new();
        for (index, title) in self.titles.iter().enumerate() {
            out.push_str(&marker(self.state(index), index, title));
            if let Some(filled) = connectors.get(index) {
                out.push_str(if *filled { " ━━ " } else { " ── " });
            }
        }
        out
    }

    pub fn render_styled(&self) -> String {
        let connectors = self.connectors();
        let mut out = String::new();
        for (index, title) in self.titles.iter().enumerate() {
            let text = marker(self.state(index), index, title);
            let styled = match self.state(index) {
                StepState::Completed => text.green().to_string(),
                StepState::Active => text.bright_cyan().bold().to_string(),
                StepState::Pending => text.dimmed().to_string(),
            };
            out.push_str(&styled);
            if let Some(filled) = connectors.get(index) {
                let connector = if *filled {
                    " ━━ ".green().to_string()
                } else {
                    " ── ".dimmed().to_string()
                };
                out.push_str(&connector);
            }
        }
        out
    }
}

fn marker(state: StepState, index: usize, title: &str) -> String {
    let symbol = match state {
        StepState::Completed => "✓",
        StepState::Active => "●",
        StepState::Pending => "○",
    };
    format!("({} {} {})", symbol, index + 1, title)
}
