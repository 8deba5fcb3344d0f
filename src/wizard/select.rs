/// Case-insensitive substring filter over a reference list.
pub fn filter_options<'a>(options: &[&'a str], query: &str) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    options
        .iter()
        .copied()
        .filter(|option| option.to_lowercase().contains(&needle))
        .collect()
}

/// Transient state of a searchable select: the text typed so far and whether
/// the dropdown is open. The bound value itself lives in the form data and is
/// written only through the callback handed to each event.
#[derive(Debug, Clone)]
pub struct SearchableSelect {
    options: &'static [&'static str],
    query: String,
    open: bool,
}

impl SearchableSelect {
    pub fn new(options: &'static [&'static str]) -> Self {
        Self {
            options,
            query: String::new(),
            open: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn matches(&self) -> Vec<&'static str> {
        filter_options(self.options, &self.query)
    }

    /// Options to show, `None` when closed or when nothing matches.
    pub fn dropdown(&self) -> Option<Vec<&'static str>> {
        if !self.open {
            return None;
        }
        let matches = self.matches();
        if matches.is_empty() {
            None
        } else {
            Some(matches)
        }
    }

    /// Handles a keystroke: the raw text is bound immediately so custom values
    /// are accepted, then the filter is recomputed.
    pub fn input<F>(&mut self, text: &str, mut bind: F) -> Vec<&'static str>
    where
        F: FnMut(&str),
    {
        self.query = text.to_string();
        self.open = true;
        bind(text);
        self.matches()
    }

    pub fn blur(&mut self) {
        self.open = false;
    }

    /// Picks the `index`th visible match, binding its canonical text.
    pub fn pick<F>(&mut self, index: usize, mut bind: F) -> Option<&'static str>
    where
        F: FnMut(&str),
    {
        let choice = *self.matches().get(index)?;
        self.query = choice.to_string();
        self.open = false;
        bind(choice);
        Some(choice)
    }
}
