//! Nearest named color lookup.

use palette::{
    Srgb,
    named,
};

/// Returned by [`ColorClassifier::closest_name`] when there are no
/// references to pick from.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceColor {
    pub name: &'static str,
    pub rgb: Srgb<u8>,
}

impl ReferenceColor {
    pub const fn new(name: &'static str, rgb: Srgb<u8>) -> Self {
        Self { name, rgb }
    }
}

/// The 16 basic CSS colors, in lookup order.
///
/// Order matters: on equal distance the earlier entry wins.
pub const REFERENCE_COLORS: [ReferenceColor; 16] = [
    ReferenceColor::new("Black", named::BLACK),
    ReferenceColor::new("White", named::WHITE),
    ReferenceColor::new("Red", named::RED),
    ReferenceColor::new("Lime", named::LIME),
    ReferenceColor::new("Blue", named::BLUE),
    ReferenceColor::new("Yellow", named::YELLOW),
    ReferenceColor::new("Cyan", named::CYAN),
    ReferenceColor::new("Magenta", named::MAGENTA),
    ReferenceColor::new("Silver", named::SILVER),
    ReferenceColor::new("Gray", named::GRAY),
    ReferenceColor::new("Maroon", named::MAROON),
    ReferenceColor::new("Olive", named::OLIVE),
    ReferenceColor::new("Green", named::GREEN),
    ReferenceColor::new("Purple", named::PURPLE),
    ReferenceColor::new("Teal", named::TEAL),
    ReferenceColor::new("Navy", named::NAVY),
];

/// Maps colors to the closest of a fixed list of references, by euclidean
/// distance in RGB space.
#[derive(Clone, Copy, Debug)]
pub struct ColorClassifier<'a> {
    references: &'a [ReferenceColor],
}

impl ColorClassifier<'static> {
    pub const fn standard() -> Self {
        Self::new(&REFERENCE_COLORS)
    }
}

impl Default for ColorClassifier<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> ColorClassifier<'a> {
    pub const fn new(references: &'a [ReferenceColor]) -> Self {
        Self { references }
    }

    pub fn references(&self) -> &'a [ReferenceColor] {
        self.references
    }

    /// Returns the closest reference, or `None` if there are no references.
    ///
    /// A reference only replaces the current best if it is strictly closer,
    /// so ties go to whichever was declared first.
    pub fn closest(&self, rgb: Srgb<u8>) -> Option<&'a ReferenceColor> {
        let mut closest = None;
        let mut min_distance = u32::MAX;

        for reference in self.references {
            let distance = distance_squared(rgb, reference.rgb);
            if distance < min_distance {
                min_distance = distance;
                closest = Some(reference);
            }
        }

        closest
    }

    pub fn closest_name(&self, rgb: Srgb<u8>) -> &'a str {
        self.closest(rgb)
            .map_or(NOT_AVAILABLE, |reference| reference.name)
    }
}

/// Name of the closest of the [`REFERENCE_COLORS`].
pub fn closest_name(red: u8, green: u8, blue: u8) -> &'static str {
    ColorClassifier::standard().closest_name(Srgb::new(red, green, blue))
}

/// Squared euclidean distance. Orders the same as the distance itself, without
/// the square root.
pub fn distance_squared(a: Srgb<u8>, b: Srgb<u8>) -> u32 {
    let channel = |a: u8, b: u8| {
        let d = i32::from(a) - i32::from(b);
        (d * d) as u32
    };

    channel(a.red, b.red) + channel(a.green, b.green) + channel(a.blue, b.blue)
}

#[cfg(test)]
mod tests {
    use palette::Srgb;

    use crate::classify::{
        ColorClassifier,
        NOT_AVAILABLE,
        REFERENCE_COLORS,
        ReferenceColor,
        closest_name,
        distance_squared,
    };

    #[test]
    fn it_names_reference_colors_exactly() {
        for reference in &REFERENCE_COLORS {
            let rgb = reference.rgb;
            assert_eq!(closest_name(rgb.red, rgb.green, rgb.blue), reference.name);
        }
    }

    #[test]
    fn it_has_the_basic_css_colors() {
        assert_eq!(REFERENCE_COLORS[0].rgb, Srgb::new(0, 0, 0));
        assert_eq!(REFERENCE_COLORS[3].rgb, Srgb::new(0, 255, 0));
        assert_eq!(REFERENCE_COLORS[8].rgb, Srgb::new(192, 192, 192));
        assert_eq!(REFERENCE_COLORS[12].rgb, Srgb::new(0, 128, 0));
        assert_eq!(REFERENCE_COLORS[15].rgb, Srgb::new(0, 0, 128));
    }

    #[test]
    fn it_picks_a_minimal_distance() {
        let classifier = ColorClassifier::standard();

        for red in (0..=255).step_by(15) {
            for green in (0..=255).step_by(15) {
                for blue in (0..=255).step_by(15) {
                    let rgb = Srgb::new(red, green, blue);
                    let closest = classifier.closest(rgb).unwrap();
                    let distance = distance_squared(rgb, closest.rgb);

                    for other in &REFERENCE_COLORS {
                        assert!(
                            distance <= distance_squared(rgb, other.rgb),
                            "{rgb:?}: {} is closer than {}",
                            other.name,
                            closest.name
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn it_matches_nearby_colors() {
        assert_eq!(closest_name(250, 5, 5), "Red");
        assert_eq!(closest_name(0, 0, 100), "Navy");
        assert_eq!(closest_name(130, 0, 125), "Purple");
        assert_eq!(closest_name(240, 240, 250), "White");
    }

    #[test]
    fn it_keeps_the_earlier_reference_on_ties() {
        // halfway between Black and Maroon
        for _ in 0..3 {
            assert_eq!(closest_name(64, 0, 0), "Black");
        }

        // halfway between Silver and Gray
        assert_eq!(closest_name(160, 160, 160), "Silver");

        let references = [
            ReferenceColor::new("first", Srgb::new(0, 0, 0)),
            ReferenceColor::new("second", Srgb::new(20, 0, 0)),
        ];
        let classifier = ColorClassifier::new(&references);
        assert_eq!(classifier.closest_name(Srgb::new(10, 0, 0)), "first");

        let swapped = [references[1], references[0]];
        let classifier = ColorClassifier::new(&swapped);
        assert_eq!(classifier.closest_name(Srgb::new(10, 0, 0)), "second");
    }

    #[test]
    fn it_falls_back_without_references() {
        let classifier = ColorClassifier::new(&[]);
        assert!(classifier.closest(Srgb::new(1, 2, 3)).is_none());
        assert_eq!(classifier.closest_name(Srgb::new(1, 2, 3)), NOT_AVAILABLE);
    }
}
