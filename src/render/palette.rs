use indexmap::IndexMap;

use crate::render::Color;

/// Ten-step categorical scheme used when the host supplies no palette.
pub const DEFAULT_SERIES_COLORS: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

/// Ordinal color assignment keyed by series key.
///
/// Keys receive slots in first-seen order and keep them for the palette's
/// lifetime, so a series never changes color across data updates or mode
/// switches. Slots wrap around when keys outnumber colors.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalPalette {
    colors: Vec<Color>,
    assigned: IndexMap<String, usize>,
}

impl OrdinalPalette {
    /// Falls back to [`DEFAULT_SERIES_COLORS`] when `colors` is empty.
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        let colors = if colors.is_empty() {
            DEFAULT_SERIES_COLORS.to_vec()
        } else {
            colors
        };
        Self {
            colors,
            assigned: IndexMap::new(),
        }
    }

    /// Assigns slots to unseen keys in iteration order.
    pub fn register<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            if !self.assigned.contains_key(key) {
                let slot = self.assigned.len();
                self.assigned.insert(key.to_owned(), slot);
            }
        }
    }

    /// Color of a registered key; unknown keys get the first color.
    #[must_use]
    pub fn color(&self, series_key: &str) -> Color {
        let slot = self.assigned.get(series_key).copied().unwrap_or(0);
        self.colors[slot % self.colors.len()]
    }
}

impl Default for OrdinalPalette {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_first_seen_order_and_persist() {
        let mut palette = OrdinalPalette::default();
        palette.register(["revenue", "tax"]);
        let revenue = palette.color("revenue");

        palette.register(["discount", "revenue"]);
        assert_eq!(palette.color("revenue"), revenue);
        assert_eq!(palette.color("discount"), DEFAULT_SERIES_COLORS[2]);
    }

    #[test]
    fn slots_wrap_when_palette_is_exhausted() {
        let mut palette =
            OrdinalPalette::new(vec![Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 1.0, 0.0)]);
        palette.register(["a", "b", "c"]);
        assert_eq!(palette.color("c"), palette.color("a"));
    }
}
