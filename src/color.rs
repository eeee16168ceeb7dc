// Color classification - maps an averaged RGB triple to a tile category
//
// This is a heuristic dominant/recessive-channel test, not a perceptual
// color distance. The constants, evaluation order, and comparison operators
// determine the visual output and must stay exactly as they are.

/// Dominance rate for the channel comparisons
pub const DOMINANCE_RATE: f32 = 0.79;

/// Complement of the dominance rate
pub const UNDER_RATE: f32 = 1.0 - DOMINANCE_RATE;

/// Scale applied to the averaged brightness when deriving saturation.
/// Identity in the reference configuration, kept as a tunable knob.
pub const COLOR_DIV: f32 = 1.0;

/// Tile color category
///
/// One of seven mutually exclusive classes a tile (or a downsampled
/// screen block) can fall into. `Gray` is the fallback when no channel
/// dominates or recedes enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Red channel dominates
    Red,
    /// Red channel recedes
    NotRed,
    /// Green channel dominates
    Green,
    /// Green channel recedes
    NotGreen,
    /// Blue channel dominates
    Blue,
    /// Blue channel recedes
    NotBlue,
    /// No channel dominates or recedes
    Gray,
}

impl Category {
    /// All categories, in bucket index order
    pub const ALL: [Category; 7] = [
        Category::Red,
        Category::NotRed,
        Category::Green,
        Category::NotGreen,
        Category::Blue,
        Category::NotBlue,
        Category::Gray,
    ];

    /// Bucket index for this category
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Category::Red => 0,
            Category::NotRed => 1,
            Category::Green => 2,
            Category::NotGreen => 3,
            Category::Blue => 4,
            Category::NotBlue => 5,
            Category::Gray => 6,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Red => "red",
            Category::NotRed => "not-red",
            Category::Green => "green",
            Category::NotGreen => "not-green",
            Category::Blue => "blue",
            Category::NotBlue => "not-blue",
            Category::Gray => "gray",
        };
        write!(f, "{}", name)
    }
}

/// Classify an averaged RGB triple
///
/// # Arguments
/// * `r`, `g`, `b` - Channel averages (already averaged by the caller)
///
/// # Returns
/// The category plus a saturation scalar in 0-255 used as a sort/lookup
/// key (not the HSV saturation channel).
///
/// The rules are evaluated in a fixed order, first match wins:
/// dominant red/green/blue, then recessive red/green/blue, then gray.
pub fn classify(r: u8, g: u8, b: u8) -> (Category, u8) {
    let rf = r as f32;
    let gf = g as f32;
    let bf = b as f32;

    let category = if rf > gf + gf * UNDER_RATE && rf > bf + bf * UNDER_RATE {
        Category::Red
    } else if gf > rf + rf * UNDER_RATE && gf > bf + bf * UNDER_RATE {
        Category::Green
    } else if bf > gf + gf * UNDER_RATE && bf > rf + rf * UNDER_RATE {
        Category::Blue
    } else if rf < gf * DOMINANCE_RATE && rf < bf * DOMINANCE_RATE {
        Category::NotRed
    } else if gf < rf * DOMINANCE_RATE && gf < bf * DOMINANCE_RATE {
        Category::NotGreen
    } else if bf < gf * DOMINANCE_RATE && bf < rf * DOMINANCE_RATE {
        Category::NotBlue
    } else {
        Category::Gray
    };

    let brightness = (r as u32 + g as u32 + b as u32) / 3;
    let saturation = (brightness as f32 * COLOR_DIV).round() as u8;

    (category, saturation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_channels() {
        assert_eq!(classify(255, 0, 0).0, Category::Red);
        assert_eq!(classify(0, 255, 0).0, Category::Green);
        assert_eq!(classify(0, 0, 255).0, Category::Blue);
    }

    #[test]
    fn test_black_is_gray() {
        // All channels equal and zero: every rule fails, falls through
        let (category, saturation) = classify(0, 0, 0);
        assert_eq!(category, Category::Gray);
        assert_eq!(saturation, 0);
    }

    #[test]
    fn test_white_is_gray() {
        let (category, saturation) = classify(255, 255, 255);
        assert_eq!(category, Category::Gray);
        assert_eq!(saturation, 255);
    }

    #[test]
    fn test_recessive_channels() {
        assert_eq!(classify(50, 200, 200).0, Category::NotRed);
        assert_eq!(classify(200, 50, 200).0, Category::NotGreen);
        assert_eq!(classify(200, 200, 50).0, Category::NotBlue);
    }

    #[test]
    fn test_dominance_beats_recessive() {
        // Red dominates even though blue also recedes: rule order decides
        let (category, _) = classify(200, 50, 20);
        assert_eq!(category, Category::Red);
    }

    #[test]
    fn test_near_equal_is_gray() {
        // 200 vs 190: neither dominates (needs > 190 * 1.21) nor recedes
        assert_eq!(classify(200, 190, 195).0, Category::Gray);
    }

    #[test]
    fn test_saturation_is_average_brightness() {
        let (_, saturation) = classify(30, 60, 90);
        assert_eq!(saturation, 60);

        let (_, saturation) = classify(255, 255, 255);
        assert_eq!(saturation, 255);
    }

    #[test]
    fn test_category_indices_cover_all() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}
