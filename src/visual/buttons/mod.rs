pub mod animations;
pub mod components;

pub use animations::{animate_wobble, apply_affordance};
pub use components::{
    ButtonExtent, EvaderAffordance, EvaderButton, PlayAreaMember, TargetButton, Wobble,
};
