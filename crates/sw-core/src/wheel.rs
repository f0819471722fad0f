use crate::error::{WheelError, WheelResult};
use crate::option::{WheelOption, color_for};
use crate::selection::Selection;

/// Outcome of adding a batch of newline-separated options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    /// Number of options appended.
    pub added: usize,
    /// Number of lines skipped because the text was already present.
    pub duplicates: usize,
    /// Whether the option cap stopped the batch early.
    pub hit_limit: bool,
}

/// The ordered option list. Insertion order is segment order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wheel {
    options: Vec<WheelOption>,
    max_options: usize,
    min_options: usize,
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(50, 2)
    }
}

impl Wheel {
    /// Create an empty wheel with the given limits.
    pub fn new(max_options: usize, min_options: usize) -> Self {
        Self {
            options: Vec::new(),
            max_options,
            min_options,
        }
    }

    /// The four placeholder options a fresh wheel starts with.
    pub fn with_defaults(max_options: usize, min_options: usize) -> Self {
        let mut wheel = Self::new(max_options, min_options);
        for n in 1..=4 {
            // A fresh wheel cannot hold duplicates or be full.
            let _ = wheel.add(&format!("Option {n}"));
        }
        wheel
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// All options in segment order.
    pub fn options(&self) -> &[WheelOption] {
        &self.options
    }

    /// Option at `index`.
    pub fn get(&self, index: usize) -> Option<&WheelOption> {
        self.options.get(index)
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the wheel has no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// The option cap.
    pub fn max_options(&self) -> usize {
        self.max_options
    }

    /// How many options must remain after removals.
    pub fn min_options(&self) -> usize {
        self.min_options
    }

    /// Whether an option with this text exists (case-insensitive).
    pub fn contains(&self, text: &str) -> bool {
        self.options.iter().any(|o| o.matches(text))
    }

    /// Locate an option by exact text and color.
    pub fn find(&self, text: &str, color: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.text == text && o.color == color)
    }

    /// Locate an option by text, ignoring case.
    pub fn position_of(&self, text: &str) -> Option<usize> {
        self.options.iter().position(|o| o.matches(text))
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Append one option. The text is trimmed; its color comes from the
    /// palette slot of its position.
    pub fn add(&mut self, text: &str) -> WheelResult<&WheelOption> {
        let text = text.trim();
        if text.is_empty() {
            return Err(WheelError::EmptyOption);
        }
        if self.contains(text) {
            return Err(WheelError::DuplicateOption(text.to_string()));
        }
        if self.options.len() >= self.max_options {
            return Err(WheelError::WheelFull {
                max: self.max_options,
            });
        }
        let option = WheelOption::new(text, color_for(self.options.len()));
        self.options.push(option);
        Ok(&self.options[self.options.len() - 1])
    }

    /// Append every non-empty line of `input`, skipping duplicates and
    /// stopping at the cap. Fails only when the input has no text at all.
    pub fn add_batch(&mut self, input: &str) -> WheelResult<AddReport> {
        let lines: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(WheelError::EmptyOption);
        }

        let mut report = AddReport::default();
        for line in lines {
            match self.add(line) {
                Ok(_) => report.added += 1,
                Err(WheelError::DuplicateOption(_)) => report.duplicates += 1,
                Err(WheelError::WheelFull { .. }) => {
                    report.hit_limit = true;
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }

    /// Remove the option at `index`.
    pub fn remove(&mut self, index: usize) -> WheelResult<WheelOption> {
        if index >= self.options.len() {
            return Err(WheelError::IndexOutOfRange(index));
        }
        Ok(self.options.remove(index))
    }

    /// Remove every selected option, highest index first. Rejected without
    /// any change if fewer than `min_options` would remain or if a selected
    /// index is out of range.
    pub fn remove_many(&mut self, selection: &Selection) -> WheelResult<Vec<WheelOption>> {
        if let Some(bad) = selection.iter().find(|i| *i >= self.options.len()) {
            return Err(WheelError::IndexOutOfRange(bad));
        }
        let remaining = self.options.len() - selection.len();
        if remaining < self.min_options {
            return Err(WheelError::MustKeep {
                min: self.min_options,
            });
        }
        let removed = selection
            .descending()
            .map(|i| self.options.remove(i))
            .collect();
        Ok(removed)
    }

    /// Remove every option.
    pub fn clear(&mut self) {
        self.options.clear();
    }

    /// Replace the option list wholesale (loading a saved wheel). Stored
    /// entries get the same checks as [`Wheel::add`]: text is trimmed, and
    /// blank entries, case-insensitive duplicates and entries beyond the cap
    /// are dropped. Colors are kept as stored.
    pub fn replace(&mut self, options: Vec<WheelOption>) {
        let offered = options.len();
        self.options.clear();
        for mut option in options {
            if self.options.len() >= self.max_options {
                break;
            }
            option.text = option.text.trim().to_string();
            if option.text.is_empty() || self.contains(&option.text) {
                continue;
            }
            self.options.push(option);
        }
        if self.options.len() < offered {
            log::debug!(
                "dropped {} stored options while loading",
                offered - self.options.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel_of(texts: &[&str]) -> Wheel {
        let mut wheel = Wheel::default();
        for t in texts {
            wheel.add(t).unwrap();
        }
        wheel
    }

    #[test]
    fn add_assigns_palette_colors_in_order() {
        let wheel = wheel_of(&["A", "B", "C"]);
        assert_eq!(wheel.get(0).unwrap().color, color_for(0));
        assert_eq!(wheel.get(2).unwrap().color, color_for(2));
    }

    #[test]
    fn add_trims_and_rejects_empty() {
        let mut wheel = Wheel::default();
        assert_eq!(wheel.add("  Tacos  ").unwrap().text, "Tacos");
        assert!(matches!(wheel.add("   "), Err(WheelError::EmptyOption)));
    }

    #[test]
    fn duplicate_rejected_case_insensitive() {
        let mut wheel = wheel_of(&["Pizza"]);
        let result = wheel.add("PIZZA");
        assert!(matches!(result, Err(WheelError::DuplicateOption(_))));
        assert_eq!(wheel.len(), 1);
    }

    #[test]
    fn fifty_first_rejected_first_fifty_untouched() {
        let mut wheel = Wheel::default();
        for i in 0..50 {
            wheel.add(&format!("opt {i}")).unwrap();
        }
        let before = wheel.clone();
        let result = wheel.add("one too many");
        assert!(matches!(result, Err(WheelError::WheelFull { max: 50 })));
        assert_eq!(wheel, before);
    }

    #[test]
    fn batch_splits_lines_and_counts_duplicates() {
        let mut wheel = wheel_of(&["A"]);
        let report = wheel.add_batch("B\n\n a \nC\nb").unwrap();
        assert_eq!(report.added, 2);
        assert_eq!(report.duplicates, 2);
        assert!(!report.hit_limit);
        let texts: Vec<_> = wheel.options().iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
    }

    #[test]
    fn batch_stops_at_limit() {
        let mut wheel = Wheel::new(3, 2);
        let report = wheel.add_batch("a\nb\nc\nd\ne").unwrap();
        assert_eq!(report.added, 3);
        assert!(report.hit_limit);
        assert_eq!(wheel.len(), 3);
    }

    #[test]
    fn batch_of_blank_lines_is_empty_input() {
        let mut wheel = Wheel::default();
        assert!(matches!(
            wheel.add_batch("\n  \n"),
            Err(WheelError::EmptyOption)
        ));
    }

    #[test]
    fn remove_many_keeps_minimum() {
        let mut wheel = wheel_of(&["A", "B", "C", "D"]);
        let mut sel = Selection::new();
        sel.extend([0, 1, 2]);
        let before = wheel.clone();
        let result = wheel.remove_many(&sel);
        assert!(matches!(result, Err(WheelError::MustKeep { min: 2 })));
        assert_eq!(wheel, before);
    }

    #[test]
    fn remove_many_removes_selected() {
        let mut wheel = wheel_of(&["A", "B", "C", "D"]);
        let mut sel = Selection::new();
        sel.extend([0, 2]);
        let removed = wheel.remove_many(&sel).unwrap();
        assert_eq!(removed.len(), 2);
        let texts: Vec<_> = wheel.options().iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["B", "D"]);
    }

    #[test]
    fn remove_out_of_range() {
        let mut wheel = wheel_of(&["A"]);
        assert!(matches!(
            wheel.remove(5),
            Err(WheelError::IndexOutOfRange(5))
        ));
    }

    #[test]
    fn defaults_and_find() {
        let wheel = Wheel::with_defaults(50, 2);
        assert_eq!(wheel.len(), 4);
        assert_eq!(wheel.get(3).unwrap().text, "Option 4");
        assert_eq!(wheel.find("Option 2", color_for(1)), Some(1));
        assert_eq!(wheel.find("Option 2", color_for(0)), None);
        assert_eq!(wheel.position_of("option 3"), Some(2));
    }

    #[test]
    fn replace_truncates_to_cap() {
        let mut wheel = Wheel::new(2, 2);
        wheel.replace(vec![
            WheelOption::new("a", "#000000"),
            WheelOption::new("b", "#000000"),
            WheelOption::new("c", "#000000"),
        ]);
        assert_eq!(wheel.len(), 2);
    }

    #[test]
    fn replace_cleans_stored_entries() {
        let mut wheel = wheel_of(&["old"]);
        wheel.replace(vec![
            WheelOption::new("  Pizza ", "#111111"),
            WheelOption::new("   ", "#222222"),
            WheelOption::new("PIZZA", "#333333"),
            WheelOption::new("Sushi", "#444444"),
        ]);
        let texts: Vec<_> = wheel.options().iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["Pizza", "Sushi"]);
        assert_eq!(wheel.get(1).unwrap().color, "#444444");
    }
}
