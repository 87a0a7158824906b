/// The two trained gesture classes. The label set is fixed; there is no
/// dynamic class registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    NotTouching,
    Touching,
}

impl GestureLabel {
    pub const ALL: [GestureLabel; 2] = [GestureLabel::NotTouching, GestureLabel::Touching];

    pub fn as_str(self) -> &'static str {
        match self {
            GestureLabel::NotTouching => "not touching",
            GestureLabel::Touching => "touching",
        }
    }

    /// Stable index for confidence arrays.
    pub(crate) fn index(self) -> usize {
        match self {
            GestureLabel::NotTouching => 0,
            GestureLabel::Touching => 1,
        }
    }
}

impl std::fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_two_labels() {
        assert_eq!(GestureLabel::ALL.len(), 2);
        assert_ne!(GestureLabel::ALL[0], GestureLabel::ALL[1]);
    }

    #[test]
    fn test_display() {
        assert_eq!(GestureLabel::Touching.to_string(), "touching");
        assert_eq!(GestureLabel::NotTouching.to_string(), "not touching");
    }
}
