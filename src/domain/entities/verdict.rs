/// Outcome of scanning a status page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The site is down for everyone
    Down,
    /// The site is up, the problem is local
    Up,
}

impl Verdict {
    pub fn as_str(&self) -> &str {
        match self {
            Verdict::Down => "down",
            Verdict::Up => "up",
        }
    }
}
