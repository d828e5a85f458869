use bevy::prelude::*;

use crate::visual::{
    buttons::components::{EvaderAffordance, EvaderButton, Wobble},
    setup::SceneAssets,
};

/// System: Advance the wobble and tilt the button
pub fn animate_wobble(time: Res<Time>, mut buttons: Query<(&mut Transform, &mut Wobble)>) {
    let dt = time.delta_secs();

    for (mut transform, mut wobble) in &mut buttons {
        if !wobble.is_active() && transform.rotation == Quat::IDENTITY {
            continue;
        }
        let angle = wobble.advance(dt);
        transform.rotation = Quat::from_rotation_z(angle);
    }
}

/// System: Swap the evader to its calm colour once it settles
pub fn apply_affordance(
    assets: Res<SceneAssets>,
    mut evaders: Query<
        (&EvaderAffordance, &mut MeshMaterial3d<StandardMaterial>),
        (With<EvaderButton>, Changed<EvaderAffordance>),
    >,
) {
    for (affordance, mut material) in &mut evaders {
        let handle = if affordance.interactive {
            assets.evader_settled.clone()
        } else {
            assets.evader.clone()
        };

        if material.0 != handle {
            material.0 = handle;
            info!("😌 Evader calmed down - it can be clicked now");
        }
    }
}
