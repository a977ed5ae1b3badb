/// Host-facing message produced by a reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// A bomb was hit but lives remain.
    HitMine { lives_left: u8 },
    GameOver,
    Won,
}

/// Follow-up the host should offer after a prompt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Choice {
    Continue,
    /// Back to the difficulty menu for a new game.
    Restart,
    Quit,
}

impl Prompt {
    pub const fn title(self) -> &'static str {
        match self {
            Self::HitMine { .. } => "Hit a Mine!",
            Self::GameOver => "Game Over!",
            Self::Won => "Congratulations!",
        }
    }

    pub fn message(self) -> String {
        match self {
            Self::HitMine { lives_left } => format!("Lives remaining: {}", lives_left),
            Self::GameOver => "You're out of lives!".to_owned(),
            Self::Won => "You've won the game!".to_owned(),
        }
    }

    pub const fn choices(self) -> &'static [Choice] {
        match self {
            Self::HitMine { .. } => &[Choice::Continue],
            Self::GameOver | Self::Won => &[Choice::Restart, Choice::Quit],
        }
    }

    pub const fn is_final(self) -> bool {
        !matches!(self, Self::HitMine { .. })
    }
}
