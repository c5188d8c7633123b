//! Fixed color palette used to give every target a visual identity.
//!
//! The palette is an ordered list of `#rrggbb` colors. The "next available"
//! color is the first entry no current target uses; once every entry is taken
//! the palette wraps to its first color, so colors may repeat when targets
//! outnumber the palette.

/// Colors offered for new targets, in suggestion order.
pub const DEFAULT_COLORS: &[&str] = &[
    "#1e90ff", "#32cd32", "#ff1493", "#8a2be2", "#ff8c00", "#00ced1", "#dc143c",
];

/// An immutable, non-empty, ordered set of hex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: &'static [&'static str],
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS)
    }
}

impl Palette {
    /// Build a palette from a static color list.
    ///
    /// Panics at compile time (in const context) or construction if `colors` is empty.
    pub const fn new(colors: &'static [&'static str]) -> Self {
        assert!(!colors.is_empty(), "palette needs at least one color");
        Self { colors }
    }

    pub fn colors(&self) -> &'static [&'static str] {
        self.colors
    }

    pub fn first(&self) -> &'static str {
        self.colors[0]
    }

    /// Lowest-index palette color not contained in `used`, or the first color
    /// if all of them are taken. Comparison ignores ASCII case.
    ///
    /// ### Example
    /// ```
    /// use azel_rs::palette::Palette;
    /// let p = Palette::default();
    /// assert_eq!(p.next_available(["#1E90FF"]), "#32cd32");
    /// ```
    pub fn next_available<'a>(&self, used: impl IntoIterator<Item = &'a str>) -> &'static str {
        let used: Vec<&str> = used.into_iter().collect();
        self.colors
            .iter()
            .copied()
            .find(|c| !used.iter().any(|u| u.eq_ignore_ascii_case(c)))
            .unwrap_or_else(|| self.first())
    }
}

/// Validate a `#rrggbb` color and normalise it to lowercase.
pub fn normalize_hex(color: &str) -> Option<String> {
    let c = color.trim();
    let digits = c.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    Some(c.to_ascii_lowercase())
}
