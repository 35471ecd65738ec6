use std::fmt;

/// Grid header text. `displayed` equals `total` while filtering is disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhotoCount {
    pub total: usize,
    pub displayed: usize,
}

impl PhotoCount {
    pub fn all(total: usize) -> Self {
        Self {
            total,
            displayed: total,
        }
    }
}

impl fmt::Display for PhotoCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.total == 1 { "photo" } else { "photos" };
        if self.displayed == self.total {
            write!(f, "{} {}", self.total, noun)
        } else {
            write!(f, "Showing {} of {} {}", self.displayed, self.total, noun)
        }
    }
}
