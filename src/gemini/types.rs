use std::fmt;

/// Response statuses produced by the index page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// `20`: the body follows.
    Success,
    /// `40`: something went wrong, try again later. Carries no detail.
    TemporaryFailure,
}

impl Status {
    /// The two-digit code sent on the status line.
    pub fn code(self) -> &'static str {
        match self {
            Status::Success => "20",
            Status::TemporaryFailure => "40",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
