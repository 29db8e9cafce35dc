use std::fmt;
use std::str::FromStr;

/// X always moves first and is player one.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash)]
pub enum Player {
    X = 0,
    O = 1,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::X, Player::O];

    pub fn opposite(&self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn is_player1(&self) -> bool {
        *self == Player::X
    }

    pub fn from_player1(player1: bool) -> Self {
        if player1 {
            Player::X
        } else {
            Player::O
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Player::X => 'x',
            Player::O => 'o',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'x' => Some(Player::X),
            'o' => Some(Player::O),
            _ => None,
        }
    }

    /// Index into per-player tables such as the zobrist numbers.
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// used for parsing cli args
type ParseError = &'static str;
impl FromStr for Player {
    type Err = ParseError;
    fn from_str(player: &str) -> Result<Self, Self::Err> {
        let mut chars = player.trim().chars();
        match (chars.next().and_then(Player::from_symbol), chars.next()) {
            (Some(parsed), None) => Ok(parsed),
            _ => Err("invalid player; options are: x, o"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        for player in Player::ALL {
            assert_ne!(player, player.opposite());
            assert_eq!(player, player.opposite().opposite());
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("x".parse::<Player>(), Ok(Player::X));
        assert_eq!(" O ".parse::<Player>(), Ok(Player::O));
        assert!("xo".parse::<Player>().is_err());
        assert!("".parse::<Player>().is_err());
    }

    #[test]
    fn test_player1_round_trip() {
        assert_eq!(Player::from_player1(Player::X.is_player1()), Player::X);
        assert_eq!(Player::from_player1(Player::O.is_player1()), Player::O);
    }
}
