//! Background reading: the two postulates and what follows from them.

use crate::relativity::{KinematicsError, Velocity, length_contraction, relativistic_mass, time_dilation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub body: &'static str,
    pub formula: Option<&'static str>,
}

pub const POSTULATES: [Card; 2] = [
    Card {
        title: "The principle of relativity",
        body: "There is no absolute rest. Aboard a ship coasting at constant velocity every \
               experiment comes out exactly as it would on Earth; without looking outside you \
               cannot tell whether you are moving.",
        formula: None,
    },
    Card {
        title: "The speed of light",
        body: "Light always travels at 299,792,458 m/s, whether its source approaches or \
               recedes. It is the same for every observer and nothing can outrun it.",
        formula: None,
    },
];

pub const CONSEQUENCES: [Card; 3] = [
    Card {
        title: "Time dilation",
        body: "Moving clocks tick slower. Time is personal, not universal.",
        formula: Some("Δt = γ · Δτ"),
    },
    Card {
        title: "Length contraction",
        body: "Moving objects shrink along their direction of motion.",
        formula: Some("L = L0 / γ"),
    },
    Card {
        title: "Mass increase",
        body: "The faster you go, the heavier you get. Reaching c would take infinite energy.",
        formula: Some("m = γ · m0"),
    },
];

/// One line per consequence, evaluated for a 1 s clock, a 1 m rod and a
/// 1 kg mass moving at `v`.
pub fn worked_examples(v: Velocity) -> Result<[String; 3], KinematicsError> {
    let beta = v.beta();
    Ok([
        format!("At {beta:.2}c one second aboard lasts {:.3} s for you.", time_dilation(1.0, beta)?),
        format!("At {beta:.2}c a one-metre rod measures {:.3} m.", length_contraction(1.0, beta)?),
        format!("At {beta:.2}c one kilogram behaves like {:.3} kg.", relativistic_mass(1.0, beta)?),
    ])
}
