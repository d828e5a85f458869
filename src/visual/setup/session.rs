use bevy::prelude::*;

use crate::game::{config::EvasionConfig, session::InteractionSession};

/// System: Setup the interaction session for this page
pub fn setup_session(mut commands: Commands, config: Res<EvasionConfig>) {
    let session = InteractionSession::new(config.attempt_limit, config.proximity_radius);
    info!(
        "Session ready: evader settles after {} attempts",
        session.state().attempt_limit()
    );

    commands.insert_resource(session);
}
