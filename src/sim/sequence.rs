//! Light selection: buttons and the no-immediate-repeat sequence generator

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::consts::BUTTON_COUNT;
use crate::error::GameError;

/// One of the four lights on the board, always in `0..BUTTON_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Button(u8);

impl Button {
    pub const ALL: [Button; BUTTON_COUNT as usize] = [Button(0), Button(1), Button(2), Button(3)];

    pub fn new(index: u8) -> Result<Self, GameError> {
        if index < BUTTON_COUNT {
            Ok(Self(index))
        } else {
            Err(GameError::InvalidButton(index as usize))
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Button {
    type Error = GameError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl TryFrom<usize> for Button {
    type Error = GameError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u8::try_from(index)
            .map_err(|_| GameError::InvalidButton(index))
            .and_then(Self::new)
    }
}

impl From<Button> for u8 {
    fn from(button: Button) -> Self {
        button.0
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// First light of a round, uniform over all buttons
pub fn first_light<R: RngCore + ?Sized>(rng: &mut R) -> Button {
    Button((rng.next_u32() % u32::from(BUTTON_COUNT)) as u8)
}

/// Next light, uniform over the three buttons other than `previous`
pub fn next_light<R: RngCore + ?Sized>(rng: &mut R, previous: Button) -> Button {
    let roll = (rng.next_u32() % u32::from(BUTTON_COUNT - 1)) as u8;
    if roll < previous.0 {
        Button(roll)
    } else {
        Button(roll + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::XorShift;
    use proptest::prelude::*;

    #[test]
    fn test_button_range() {
        for index in 0..BUTTON_COUNT {
            assert_eq!(Button::new(index).unwrap().index(), index as usize);
        }
        assert!(matches!(Button::new(4), Err(GameError::InvalidButton(4))));
        assert!(matches!(
            Button::try_from(300usize),
            Err(GameError::InvalidButton(300))
        ));
    }

    #[test]
    fn test_button_serde_rejects_out_of_range() {
        let button: Button = serde_json::from_str("2").unwrap();
        assert_eq!(button, Button::ALL[2]);
        assert_eq!(serde_json::to_string(&button).unwrap(), "2");
        assert!(serde_json::from_str::<Button>("7").is_err());
    }

    #[test]
    fn test_first_and_next_light_seed_one() {
        let mut rng = XorShift::new(1);
        let first = first_light(&mut rng);
        assert_eq!(first, Button::ALL[1]);
        assert_eq!(next_light(&mut rng, first), Button::ALL[0]);
    }

    #[test]
    fn test_next_light_covers_other_buttons() {
        let mut rng = XorShift::new(2024);
        for previous in Button::ALL {
            let mut seen = [false; BUTTON_COUNT as usize];
            for _ in 0..200 {
                seen[next_light(&mut rng, previous).index()] = true;
            }
            for button in Button::ALL {
                assert_eq!(seen[button.index()], button != previous, "previous {previous}");
            }
        }
    }

    proptest! {
        #[test]
        fn prop_next_light_never_repeats(seed in any::<i32>(), previous in 0u8..4, draws in 1usize..64) {
            let mut rng = XorShift::new(seed);
            let mut previous = Button::new(previous).unwrap();
            for _ in 0..draws {
                let next = next_light(&mut rng, previous);
                prop_assert_ne!(next, previous);
                prop_assert!(next.index() < BUTTON_COUNT as usize);
                previous = next;
            }
        }
    }
}
