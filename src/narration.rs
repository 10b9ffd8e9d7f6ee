//! Plain-language explanations of what each experiment is showing.

use crate::relativity::doppler::{STATIONARY_THRESHOLD, Shift};
use crate::relativity::simultaneity;
use crate::relativity::spectrum::Band;
use crate::relativity::train_tunnel::{self, ApparentLengths};
use crate::relativity::twin::Ages;
use crate::relativity::Velocity;

pub fn warp(v: Velocity) -> String {
    let gamma = v.gamma();
    if v.beta().abs() < STATIONARY_THRESHOLD {
        return "The ship is barely moving. Its clocks and its length agree with yours.".to_string();
    }
    format!(
        "At {:.0}% of light speed, γ = {:.3}. Every second aboard the ship lasts {:.3} seconds \
         for you, and the ship looks {:.1}% of its rest length along the direction of travel.",
        v.beta().abs() * 100.0,
        gamma,
        gamma,
        100.0 / gamma,
    )
}

pub fn doppler(v: Velocity, observed_band: Band) -> String {
    if v.beta().abs() < STATIONARY_THRESHOLD {
        return "You are nearly at rest relative to the star, so its light arrives at its \
                normal frequency and you see its true green colour."
            .to_string();
    }
    let mut text = match Shift::of(v) {
        Shift::Blue | Shift::None => {
            "You are closing in on the star, so its light waves are squeezed together \
             (blueshift)."
        }
        Shift::Red => "You are moving away from the star, so its light waves are stretched out (redshift).",
    }
    .to_string();
    match observed_band {
        Band::Ultraviolet => text.push_str(" The light has shifted into the ultraviolet: invisible to human eyes."),
        Band::Infrared => text.push_str(" The light has shifted into the infrared and the star fades from sight."),
        Band::Visible => {}
    }
    text
}

pub fn simultaneity(frame: simultaneity::Frame) -> &'static str {
    match frame {
        simultaneity::Frame::Observer => {
            "Seen from the platform the rod is moving. Its rear end runs into the light \
             early while the front end runs away from it, so the two flashes are NOT \
             simultaneous."
        }
        simultaneity::Frame::Rod => {
            "Seen from the rod it is at rest with the source exactly in the middle. Light \
             travels at the same speed both ways, so both ends are struck at the same instant."
        }
    }
}

pub fn train_tunnel(frame: train_tunnel::Frame, v: f64, lengths: ApparentLengths) -> String {
    let percent = v.abs() * 100.0;
    let (train, tunnel) = (lengths.train, lengths.tunnel);
    let opening = match frame {
        train_tunnel::Frame::Tunnel => {
            format!("You stand in the tunnel while the train passes at {percent:.0}% of light speed.")
        }
        train_tunnel::Frame::Train => {
            format!("You ride the train while the tunnel rushes at you at {percent:.0}% of light speed.")
        }
    };
    let verdict = match (frame, lengths.train_fits()) {
        _ if v.abs() < STATIONARY_THRESHOLD && !lengths.train_fits() => format!(
            "At this speed nothing contracts noticeably: the train ({train:.2}) is simply longer \
             than the tunnel ({tunnel:.2})."
        ),
        (train_tunnel::Frame::Tunnel, true) => format!(
            "Moving objects contract, so the train shrinks to {train:.2} and for a moment fits \
             inside the {tunnel:.2}-long tunnel."
        ),
        (train_tunnel::Frame::Tunnel, false) => format!(
            "The moving train contracts to {train:.2}, but that is still longer than the tunnel \
             ({tunnel:.2}). Go faster to make it fit."
        ),
        (train_tunnel::Frame::Train, false) => format!(
            "Now the tunnel is the one that contracts, to {tunnel:.2}, and the {train:.2}-long train \
             cannot fit. Both views are right: they disagree about which events happen at the same time."
        ),
        (train_tunnel::Frame::Train, true) => format!(
            "The tunnel contracts to {tunnel:.2}, yet it is still long enough for the {train:.2}-long train."
        ),
    };
    format!("{opening} {verdict}")
}

pub fn twin(ages: Ages) -> String {
    format!(
        "The Earth twin is {:.1} and the travelling twin is {:.1}. The traveller turns around \
         and changes inertial frames, which is what breaks the symmetry: they come home \
         {:.1} years younger.",
        ages.earth,
        ages.ship,
        ages.gap(),
    )
}
