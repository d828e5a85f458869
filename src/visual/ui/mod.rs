mod overlay;

pub use overlay::{
    ButtonLabelKind, FollowButton, HeadingText, SubText, spawn_button_label, spawn_overlay,
    sync_labels,
};
